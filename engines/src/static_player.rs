//! Static Player - One-Ply Greedy Evaluation
//!
//! Algorithm Strategy:
//! - Generate every legal move and the board it produces
//! - Score each resulting board with the evaluator, from the mover's side
//! - Select the move with the highest score
//! - Tie-breaking: first move in row-major order
//!
//! Key characteristics:
//! - No lookahead: the opponent's replies are never considered
//! - Deterministic: same board state always produces same move
//! - Equivalent to a depth-1 minimax search with the same evaluator

use othello::{successors, Board, Move, Player};

use crate::error::{EngineError, Result};
use crate::{Agent, Evaluator};

#[derive(Clone, Debug, Default)]
pub struct StaticPlayer<E> {
    evaluator: E,
}

impl<E: Evaluator> StaticPlayer<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Every legal move with the evaluation of the board it leads to, in row-major order
    pub fn score_moves(&self, board: &Board, player: Player) -> Vec<(Move, f64)> {
        successors(board, player)
            .into_iter()
            .map(|(mv, next)| (mv, self.evaluator.evaluate(&next, player)))
            .collect()
    }

    /// The legal move whose resulting board scores highest for `player`
    pub fn choose_move(&self, board: &Board, player: Player) -> Result<Move> {
        let mut best: Option<(Move, f64)> = None;

        for (mv, score) in self.score_moves(board, player) {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((mv, score)),
            }
        }

        best.map(|(mv, _)| mv)
            .ok_or(EngineError::NoLegalMove { player })
    }
}

impl<E: Evaluator> Agent for StaticPlayer<E> {
    fn choose_move(&self, board: &Board, player: Player) -> Result<Move> {
        StaticPlayer::choose_move(self, board, player)
    }
}
