//! One-hot window encoding

use crate::error::LogicError;
use crate::game::Move;
use crate::history::HISTORY_CAPACITY;

/// Moves per encoded window.
pub const WINDOW: usize = HISTORY_CAPACITY;

/// Width of a single move's indicator vector.
pub const MOVE_DIM: usize = 3;

/// Width of an encoded window.
pub const FEATURES: usize = WINDOW * MOVE_DIM;

/// Indicator vector for a single move
pub fn one_hot(m: Move) -> [f32; MOVE_DIM] {
    let mut v = [0.0; MOVE_DIM];
    v[m.index()] = 1.0;
    v
}

/// Encode a window of exactly [`WINDOW`] moves, oldest first
pub fn encode(window: &[Move]) -> Result<[f32; FEATURES], LogicError> {
    if window.len() != WINDOW {
        return Err(LogicError::WindowSize {
            expected: WINDOW,
            found: window.len(),
        });
    }

    let mut features = [0.0; FEATURES];
    for (slot, m) in window.iter().enumerate() {
        features[slot * MOVE_DIM + m.index()] = 1.0;
    }
    Ok(features)
}
