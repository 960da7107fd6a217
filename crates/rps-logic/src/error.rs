//! Error types for the prediction core

use thiserror::Error;

/// Errors raised by the logic crate.
///
/// None of these are fatal to a game session: selectors turn them into a
/// random fallback move.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LogicError {
    /// Text that is not one of `rock`, `scissors`, `paper`.
    #[error("invalid move '{0}', expected one of: rock, scissors, paper")]
    InvalidMove(String),

    /// Selector mode identifier that names no known selector.
    #[error("unknown selector mode '{0}'")]
    UnknownMode(String),

    /// A window handed to the encoder had the wrong length.
    #[error("window must hold exactly {expected} moves, got {found}")]
    WindowSize { expected: usize, found: usize },

    /// Loss or model output went NaN/infinite.
    #[error("non-finite value in model computation")]
    NonFinite,
}
