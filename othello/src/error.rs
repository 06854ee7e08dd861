//! Error types for board operations

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid move at ({row}, {col}): {reason}")]
    InvalidMove {
        row: usize,
        col: usize,
        reason: &'static str,
    },

    #[error("invalid board: {reason}")]
    InvalidBoard { reason: String },
}

pub type Result<T> = std::result::Result<T, GameError>;
