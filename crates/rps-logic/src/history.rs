//! Bounded history of the player's recent moves

use std::collections::VecDeque;

use crate::game::Move;

/// Number of moves kept, and the width of the prediction window.
pub const HISTORY_CAPACITY: usize = 10;

/// Fixed-capacity queue of player moves, oldest evicted first
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryBuffer {
    moves: VecDeque<Move>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self {
            moves: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Build from a full move history, retaining the most recent entries
    pub fn from_moves<I>(moves: I) -> Self
    where
        I: IntoIterator<Item = Move>,
    {
        let mut buffer = Self::new();
        for m in moves {
            buffer.append(m);
        }
        buffer
    }

    /// Add the latest move, evicting the oldest if at capacity
    pub fn append(&mut self, m: Move) {
        if self.moves.len() == HISTORY_CAPACITY {
            self.moves.pop_front();
        }
        self.moves.push_back(m);
    }

    /// Current contents, oldest first
    pub fn snapshot(&self) -> Vec<Move> {
        self.moves.iter().copied().collect()
    }

    /// The most recent `n` moves in chronological order, or `None` if fewer
    /// than `n` are held.
    pub fn latest(&self, n: usize) -> Option<Vec<Move>> {
        if n > self.moves.len() {
            return None;
        }
        Some(self.moves.iter().skip(self.moves.len() - n).copied().collect())
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.moves.len() == HISTORY_CAPACITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_below_capacity() {
        let mut buffer = HistoryBuffer::new();
        buffer.append(Move::Rock);
        buffer.append(Move::Paper);

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.snapshot(), vec![Move::Rock, Move::Paper]);
        assert!(!buffer.is_full());
    }

    #[test]
    fn test_evicts_oldest() {
        let mut buffer = HistoryBuffer::new();
        buffer.append(Move::Scissors);
        for _ in 0..HISTORY_CAPACITY {
            buffer.append(Move::Rock);
        }

        assert_eq!(buffer.len(), HISTORY_CAPACITY);
        assert!(buffer.snapshot().iter().all(|m| *m == Move::Rock));
    }

    #[test]
    fn test_from_moves_keeps_most_recent() {
        let moves: Vec<Move> = (0..25).map(|i| Move::ALL[i % 3]).collect();
        let buffer = HistoryBuffer::from_moves(moves.iter().copied());

        assert!(buffer.is_full());
        assert_eq!(buffer.snapshot(), moves[15..].to_vec());
    }

    #[test]
    fn test_latest() {
        let buffer = HistoryBuffer::from_moves([Move::Rock, Move::Paper, Move::Scissors]);

        assert_eq!(buffer.latest(2), Some(vec![Move::Paper, Move::Scissors]));
        assert_eq!(buffer.latest(3), Some(buffer.snapshot()));
        assert_eq!(buffer.latest(4), None);
        assert_eq!(buffer.latest(0), Some(vec![]));
    }
}
