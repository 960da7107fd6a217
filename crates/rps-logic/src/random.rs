//! Seeded pseudo-random number generator
//!
//! Deterministic PRNG for fallback moves and weight initialisation.
//! Uses a simple but effective xorshift algorithm.

use crate::game::Move;

/// Seeded random number generator
///
/// Deterministic: same seed = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a 64-bit seed
    pub fn new(seed: u64) -> Self {
        // xorshift has a fixed point at zero
        let state = (seed ^ 0x9e3779b97f4a7c15).max(1);

        // Warm up the generator
        let mut rng = Self { state };
        for _ in 0..8 {
            rng.next_u64();
        }

        rng
    }

    /// Derive an independent generator, advancing this one
    pub fn fork(&mut self) -> Self {
        let mut new_state = self.next_u64();
        new_state ^= 0x517cc1b727220a95;
        Self::new(new_state)
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// Generate next u32
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Generate a value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Uniform float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform float in [low, high)
    pub fn uniform(&mut self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.next_f32()
    }

    /// Uniformly random move
    pub fn next_move(&mut self) -> Move {
        Move::ALL[self.next_range(3) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut r1 = SeededRng::new(42);
        let mut r2 = SeededRng::new(42);

        for _ in 0..100 {
            assert_eq!(r1.next_u64(), r2.next_u64());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = SeededRng::new(1);
        let mut rng2 = SeededRng::new(2);

        let vals1: Vec<_> = (0..10).map(|_| rng1.next_u64()).collect();
        let vals2: Vec<_> = (0..10).map(|_| rng2.next_u64()).collect();

        assert_ne!(vals1, vals2);
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SeededRng::new(0x9e3779b97f4a7c15);
        let vals: Vec<_> = (0..4).map(|_| rng.next_u64()).collect();
        assert!(vals.iter().any(|v| *v != 0));
    }

    #[test]
    fn test_fork_diverges() {
        let mut parent = SeededRng::new(7);
        let mut child = parent.fork();
        assert_ne!(parent.next_u64(), child.next_u64());
    }

    #[test]
    fn test_next_range() {
        let mut rng = SeededRng::new(42);

        for max in [1, 10, 100, 1000].iter() {
            for _ in 0..100 {
                let val = rng.next_range(*max);
                assert!(val < *max, "next_range({}) returned {}", max, val);
            }
        }

        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_float_ranges() {
        let mut rng = SeededRng::new(42);
        for _ in 0..1000 {
            let f = rng.next_f32();
            assert!((0.0..1.0).contains(&f));
            let u = rng.uniform(-0.5, 0.5);
            assert!((-0.5..0.5).contains(&u));
        }
    }

    #[test]
    fn test_next_move_is_roughly_uniform() {
        let mut rng = SeededRng::new(42);
        let mut counts = [0u32; 3];
        for _ in 0..3000 {
            counts[rng.next_move().index()] += 1;
        }
        for c in counts {
            assert!(c > 850 && c < 1150, "counts {:?} not uniform", counts);
        }
    }
}
