//! Error types for the game session

use std::path::PathBuf;

use rps_logic::LogicError;
use thiserror::Error;

use crate::state::RoundPhase;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("invalid move '{0}', use one of: rock, scissors, paper")]
    InvalidMove(String),

    #[error("unknown mode '{0}'")]
    UnknownMode(String),

    #[error("invalid round state for this action: expected {expected:?}, currently {actual:?}")]
    InvalidState {
        expected: RoundPhase,
        actual: RoundPhase,
    },

    #[error("no complete round to save")]
    NoRoundToSave,

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("record file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error(transparent)]
    Logic(LogicError),
}

impl From<LogicError> for ArenaError {
    fn from(e: LogicError) -> Self {
        match e {
            LogicError::InvalidMove(m) => ArenaError::InvalidMove(m),
            LogicError::UnknownMode(m) => ArenaError::UnknownMode(m),
            other => ArenaError::Logic(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logic_errors_map_to_boundary_errors() {
        let e: ArenaError = LogicError::InvalidMove("lizard".into()).into();
        assert!(matches!(e, ArenaError::InvalidMove(ref m) if m == "lizard"));

        let e: ArenaError = LogicError::UnknownMode("9".into()).into();
        assert!(matches!(e, ArenaError::UnknownMode(ref m) if m == "9"));

        let e: ArenaError = LogicError::NonFinite.into();
        assert!(matches!(e, ArenaError::Logic(LogicError::NonFinite)));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ArenaError::InvalidMove("lizard".into()).to_string(),
            "invalid move 'lizard', use one of: rock, scissors, paper"
        );
        let e = ArenaError::InvalidState {
            expected: RoundPhase::AwaitingInput,
            actual: RoundPhase::OutcomeShown,
        };
        assert!(e.to_string().contains("OutcomeShown"));
    }
}
