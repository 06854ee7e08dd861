//! Error types for move selection

use othello::{GameError, Player};
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EngineError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("{player} has no legal move")]
    NoLegalMove { player: Player },

    #[error("search depth must be at least 1, got {depth}")]
    InvalidDepth { depth: usize },

    #[error("weight '{name}' must be non-negative and finite, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("invalid engine configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
