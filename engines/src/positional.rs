//! Static square-weight evaluation
//!
//! Scores a board as the sum of per-square weights over the player's discs
//! minus the same sum over the opponent's discs. Corners are worth the most,
//! the squares touching them are negative. Also used to order moves in the
//! minimax search.

use othello::{Board, Cell, Player, SIZE, SQUARES};

use crate::Evaluator;

// Weighted positions, row-major
#[rustfmt::skip]
pub const SQUARE_WEIGHTS: [i32; SQUARES] = [
     4, -3,  2,  2,  2,  2, -3,  4,
    -3, -4, -1, -1, -1, -1, -4, -3,
     2, -1,  1,  0,  0,  1, -1,  2,
     2, -1,  0,  1,  1,  0, -1,  2,
     2, -1,  0,  1,  1,  0, -1,  2,
     2, -1,  1,  0,  0,  1, -1,  2,
    -3, -4, -1, -1, -1, -1, -4, -3,
     4, -3,  2,  2,  2,  2, -3,  4,
];

/// Weight of the square at (row, col)
pub fn square_weight(row: usize, col: usize) -> i32 {
    SQUARE_WEIGHTS[row * SIZE + col]
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PositionalEvaluator;

impl PositionalEvaluator {
    /// Integer form of the evaluation
    pub fn weighted_sum(&self, board: &Board, player: Player) -> i32 {
        let own = player.to_cell();
        let mut total = 0;

        for (index, &weight) in SQUARE_WEIGHTS.iter().enumerate() {
            match board.cell(index / SIZE, index % SIZE) {
                Cell::Empty => {}
                cell if cell == own => total += weight,
                _ => total -= weight,
            }
        }

        total
    }
}

impl Evaluator for PositionalEvaluator {
    fn evaluate(&self, board: &Board, player: Player) -> f64 {
        self.weighted_sum(board, player) as f64
    }
}
