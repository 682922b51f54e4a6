//! Error types for board construction, moves and decoding.

use thiserror::Error;

use crate::board::Move;

/// Errors raised by [`GameState`](crate::GameState) operations.
///
/// Both variants are caller bugs: they are surfaced immediately and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("Invalid move {mv}: {reason}")]
    InvalidMove { mv: Move, reason: String },

    #[error("Invalid board configuration: {0}")]
    Configuration(String),
}

/// Error type for decoding a board from bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Invalid buffer length: expected {expected} but got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Corrupted data: {0}")]
    CorruptedData(String),

    #[error(transparent)]
    Board(#[from] BoardError),
}
