//! Moves and successor generation

use std::fmt;

use crate::{square_name, Board, Player, SIZE};

/// A placement at (row, col) by `player` together with the opponent discs it flips.
///
/// The flip set is a 64-bit square mask indexed by `row * 8 + col`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    pub row: usize,
    pub col: usize,
    pub player: Player,
    flips: u64,
}

impl Move {
    /// Build a move from an explicit flip mask.
    ///
    /// No legality check happens here; `Board::apply` rejects moves that do
    /// not fit the board they are applied to.
    pub fn new(row: usize, col: usize, player: Player, flips: u64) -> Self {
        Move {
            row,
            col,
            player,
            flips,
        }
    }

    /// Square index (row * 8 + col)
    pub fn index(&self) -> usize {
        self.row * SIZE + self.col
    }

    pub fn flips(&self) -> u64 {
        self.flips
    }

    pub fn flip_count(&self) -> u32 {
        self.flips.count_ones()
    }

    /// Flipped squares as (row, col), in row-major order
    pub fn flipped_squares(&self) -> impl Iterator<Item = (usize, usize)> {
        let mut mask = self.flips;
        std::iter::from_fn(move || {
            if mask == 0 {
                return None;
            }
            let index = mask.trailing_zeros() as usize;
            mask &= mask - 1;
            Some((index / SIZE, index % SIZE))
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", square_name(self.row, self.col))
    }
}

/// Every legal move for `player` paired with the board it produces, in row-major order
pub fn successors(board: &Board, player: Player) -> Vec<(Move, Board)> {
    board
        .legal_moves(player)
        .into_iter()
        .filter_map(|mv| board.apply(&mv).ok().map(|next| (mv, next)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;

    #[test]
    fn test_flipped_squares_row_major() {
        let mask = (1u64 << 27) | (1u64 << 9) | (1u64 << 63);
        let mv = Move::new(0, 0, Player::Black, mask);
        let squares: Vec<_> = mv.flipped_squares().collect();
        assert_eq!(squares, vec![(1, 1), (3, 3), (7, 7)]);
        assert_eq!(mv.flip_count(), 3);
    }

    #[test]
    fn test_move_display_is_algebraic() {
        let mv = Move::new(2, 3, Player::Black, 1 << 27);
        assert_eq!(mv.to_string(), "d3");
        assert_eq!(mv.index(), 19);
    }

    #[test]
    fn test_successors_initial_board() {
        let board = Board::new();
        let next = successors(&board, Player::Black);
        assert_eq!(next.len(), 4);

        for (mv, after) in &next {
            assert_eq!(after.cell(mv.row, mv.col), Cell::Black);
            assert_eq!(after.score_discs(Player::Black), (4, 1));
        }

        // The source board is never touched
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_successors_empty_when_no_moves() {
        let board = Board::empty();
        assert!(successors(&board, Player::Black).is_empty());
    }
}
