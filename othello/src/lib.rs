/// Core types and game logic for Othello (Reversi)
///
/// The board is a plain value: every operation that places a disc returns a
/// new `Board` and leaves the original untouched, so search code can branch
/// by copying.
pub mod board;
pub mod error;
pub mod moves;

pub use board::Board;
pub use error::{GameError, Result};
pub use moves::{successors, Move};

/// Board edge length
pub const SIZE: usize = 8;

/// Number of squares on the board
pub const SQUARES: usize = SIZE * SIZE;

/// The eight scan directions as (row delta, col delta)
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// The four corner squares as (row, col)
pub const CORNERS: [(usize, usize); 4] = [(0, 0), (0, 7), (7, 0), (7, 7)];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(&self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Convert player to cell representation
    pub fn to_cell(&self) -> Cell {
        match self {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Black => write!(f, "Black"),
            Player::White => write!(f, "White"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// The player owning this cell, if any
    pub fn owner(&self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }

    /// Numeric code used by `Board::state`: 0 = Empty, 1 = Black, 2 = White
    pub fn code(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => 2,
        }
    }
}

/// Algebraic name of a square, e.g. (2, 3) is "d3"
pub fn square_name(row: usize, col: usize) -> String {
    format!("{}{}", (b'a' + col as u8) as char, row + 1)
}

/// Step from (row, col) by (dr, dc), returning None when leaving the board
/// or when (row, col) is not on the board to begin with
#[inline]
pub fn offset(row: usize, col: usize, dr: i8, dc: i8) -> Option<(usize, usize)> {
    if row >= SIZE || col >= SIZE {
        return None;
    }
    let r = row as i8 + dr;
    let c = col as i8 + dc;
    if (0..SIZE as i8).contains(&r) && (0..SIZE as i8).contains(&c) {
        Some((r as usize, c as usize))
    } else {
        None
    }
}
