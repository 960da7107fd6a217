//! Game Logic for RPS Arena
//!
//! Core of a rock-paper-scissors opponent that learns from the player.
//! The player's recent moves are one-hot encoded, a small classifier
//! guesses their next move, and the computer plays the move that beats it.
//! With too little history the computer falls back to random play.

mod error;
mod game;
mod random;
mod history;
mod encoder;
mod model;
mod trainer;
mod selector;

pub use error::LogicError;
pub use game::{Move, Outcome};
pub use random::SeededRng;
pub use history::{HistoryBuffer, HISTORY_CAPACITY};
pub use encoder::{encode, one_hot, FEATURES, MOVE_DIM, WINDOW};
pub use model::{softmax, Mlp, Prediction, Sample, CLASSES, DEFAULT_HIDDEN};
pub use trainer::{prepare_examples, Example, Trainer, TrainerConfig, TrainingReport};
pub use selector::{describe_selector, LearningSelector, Mode, RandomSelector, Selector, SelectorInfo};

/// Decide a round from the player's side
pub fn outcome(player: Move, computer: Move) -> Outcome {
    if player == computer {
        Outcome::Draw
    } else if player.beats() == computer {
        Outcome::UserWin
    } else {
        Outcome::ComputerWin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_move() -> impl Strategy<Value = Move> {
        prop_oneof![Just(Move::Rock), Just(Move::Scissors), Just(Move::Paper)]
    }

    #[test]
    fn test_outcome_table() {
        use Move::*;
        assert_eq!(outcome(Rock, Scissors), Outcome::UserWin);
        assert_eq!(outcome(Scissors, Paper), Outcome::UserWin);
        assert_eq!(outcome(Paper, Rock), Outcome::UserWin);
        assert_eq!(outcome(Scissors, Rock), Outcome::ComputerWin);
        assert_eq!(outcome(Paper, Scissors), Outcome::ComputerWin);
        assert_eq!(outcome(Rock, Paper), Outcome::ComputerWin);
    }

    #[test]
    fn test_draws() {
        for m in Move::ALL {
            assert_eq!(outcome(m, m), Outcome::Draw);
        }
    }

    #[test]
    fn test_counter_move_always_wins() {
        for m in Move::ALL {
            assert_eq!(outcome(m, m.beaten_by()), Outcome::ComputerWin);
        }
    }

    proptest! {
        #[test]
        fn outcome_is_antisymmetric(a in any_move(), b in any_move()) {
            prop_assert_eq!(outcome(a, b), outcome(b, a).flip());
            if a != b {
                prop_assert_ne!(outcome(a, b), Outcome::Draw);
            }
        }
    }
}
