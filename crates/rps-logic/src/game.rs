//! Moves and round outcomes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use crate::error::LogicError;

/// A move in rock-paper-scissors
///
/// Variant order is the encoding order used by the feature encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Scissors,
    Paper,
}

impl Move {
    /// All moves in encoding order.
    pub const ALL: [Move; 3] = [Move::Rock, Move::Scissors, Move::Paper];

    /// Position of this move in a one-hot vector.
    pub fn index(self) -> usize {
        match self {
            Move::Rock => 0,
            Move::Scissors => 1,
            Move::Paper => 2,
        }
    }

    /// Inverse of [`Move::index`].
    pub fn from_index(index: usize) -> Option<Move> {
        Move::ALL.get(index).copied()
    }

    /// The move that defeats this one.
    pub fn beaten_by(self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }

    /// The move this one defeats.
    pub fn beats(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Scissors => Move::Paper,
            Move::Paper => Move::Rock,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Scissors => "scissors",
            Move::Paper => "paper",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Move {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rock" => Ok(Move::Rock),
            "scissors" => Ok(Move::Scissors),
            "paper" => Ok(Move::Paper),
            other => Err(LogicError::InvalidMove(other.to_string())),
        }
    }
}

/// Result of a round, from the player's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    UserWin,
    ComputerWin,
    Draw,
}

impl Outcome {
    /// Same round seen from the other side of the table.
    pub fn flip(self) -> Outcome {
        match self {
            Outcome::UserWin => Outcome::ComputerWin,
            Outcome::ComputerWin => Outcome::UserWin,
            Outcome::Draw => Outcome::Draw,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::UserWin => "user_win",
            Outcome::ComputerWin => "computer_win",
            Outcome::Draw => "draw",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
