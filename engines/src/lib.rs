//! Othello Move Selection Engines
//!
//! This crate picks moves for a side to play on an `othello::Board`:
//! - `heuristic`: weighted evaluation built from independent sub-metrics
//!   (disc parity, mobility, potential mobility, corners, corner adjacency,
//!   corner lines, edge and disc stability)
//! - `positional`: square-weight table evaluation
//! - `static_player`: one-ply greedy player maximizing the evaluation
//! - `minimax`: depth-bounded minimax on an explicit frame stack, with optional
//!   alpha-beta pruning
//! - `config`: serializable `EngineConfig` and the configured `Engine`
//!
//! The free functions `choose_move` and `apply_move` are the plain entry points:
//! the first selects a move with the default heuristic, the second validates and
//! plays one.

use othello::{Board, Move, Player};
use serde::{Deserialize, Serialize};

pub mod config;
pub mod error;
pub mod heuristic;
pub mod minimax;
pub mod positional;
pub mod static_player;

pub use config::{Engine, EngineConfig, EvaluatorKind};
pub use error::{EngineError, Result};
pub use heuristic::{HeuristicEvaluator, HeuristicWeights};
pub use minimax::{MinimaxPlayer, MoveOrdering, SearchResult, SearchStats};
pub use positional::PositionalEvaluator;
pub use static_player::StaticPlayer;

/// Scores a board for one side. Higher is better for `player`.
///
/// Implementations must be antisymmetric:
/// `evaluate(b, Black) == -evaluate(b, White)`.
pub trait Evaluator {
    fn evaluate(&self, board: &Board, player: Player) -> f64;
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn evaluate(&self, board: &Board, player: Player) -> f64 {
        (**self).evaluate(board, player)
    }
}

/// Anything that can pick a move for the side to play
pub trait Agent {
    fn choose_move(&self, board: &Board, player: Player) -> Result<Move>;
}

/// Move selection strategy for `choose_move`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// Best immediate evaluation
    #[default]
    Static,
    /// Minimax to a fixed number of plies
    Minimax { depth: usize },
}

/// Select a move for `player` with the default heuristic evaluator.
///
/// Fails with `NoLegalMove` when `player` has to pass, and with `InvalidDepth`
/// for a minimax depth of 0.
pub fn choose_move(board: &Board, player: Player, strategy: Strategy) -> Result<Move> {
    let evaluator = HeuristicEvaluator::default();
    match strategy {
        Strategy::Static => StaticPlayer::new(evaluator).choose_move(board, player),
        Strategy::Minimax { depth } => MinimaxPlayer::new(evaluator, depth)?.choose_move(board, player),
    }
}

/// Play `mv` on `board`, returning the new board. The input board is untouched.
pub fn apply_move(board: &Board, mv: &Move) -> Result<Board> {
    Ok(board.apply(mv)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use othello::{Cell, GameError};

    #[test]
    fn test_choose_move_strategies() {
        let board = Board::new();
        for strategy in [
            Strategy::Static,
            Strategy::Minimax { depth: 1 },
            Strategy::Minimax { depth: 3 },
        ] {
            let mv = choose_move(&board, Player::Black, strategy).unwrap();
            assert_eq!(mv.player, Player::Black);
            assert!(board.is_legal_move(mv.row, mv.col, Player::Black));
        }
    }

    #[test]
    fn test_choose_move_zero_depth() {
        let result = choose_move(&Board::new(), Player::Black, Strategy::Minimax { depth: 0 });
        assert!(matches!(result, Err(EngineError::InvalidDepth { depth: 0 })));
    }

    #[test]
    fn test_apply_move() {
        let board = Board::new();
        let mv = board.move_at(2, 3, Player::Black).unwrap();
        let next = apply_move(&board, &mv).unwrap();

        assert_eq!(next.cell(2, 3), Cell::Black);
        assert_eq!(next.cell(3, 3), Cell::Black);
        assert_eq!(board.cell(2, 3), Cell::Empty);
        assert_eq!(next.score_discs(Player::Black), (4, 1));
    }

    #[test]
    fn test_apply_move_rejects_stale_move() {
        let board = Board::new();
        let mv = board.move_at(2, 3, Player::Black).unwrap();
        let next = apply_move(&board, &mv).unwrap();

        // Same move again: the square is now taken
        assert!(matches!(
            apply_move(&next, &mv),
            Err(EngineError::Game(GameError::InvalidMove { row: 2, col: 3, .. }))
        ));
    }

    #[test]
    fn test_strategy_json() {
        let strategy: Strategy = serde_json::from_str(r#"{"kind":"minimax","depth":4}"#).unwrap();
        assert_eq!(strategy, Strategy::Minimax { depth: 4 });

        let json = serde_json::to_string(&Strategy::Static).unwrap();
        assert_eq!(json, r#"{"kind":"static"}"#);
    }

    #[test]
    fn test_evaluator_by_reference() {
        let evaluator = HeuristicEvaluator::default();
        let player = StaticPlayer::new(&evaluator);
        assert!(player.choose_move(&Board::new(), Player::Black).is_ok());
    }
}
