//! The 8x8 board, legal move scan and move application

use std::fmt;
use std::str::FromStr;

use crate::{offset, Cell, GameError, Move, Player, Result, CORNERS, DIRECTIONS, SIZE, SQUARES};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
    black_count: u8,
    white_count: u8,
}

impl Board {
    /// Create a new board with initial Othello setup
    /// Initial setup has 4 pieces in the center:
    /// - (3,3) and (4,4) are White
    /// - (3,4) and (4,3) are Black
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; SIZE]; SIZE];

        cells[3][3] = Cell::White;
        cells[3][4] = Cell::Black;
        cells[4][3] = Cell::Black;
        cells[4][4] = Cell::White;

        Board {
            cells,
            black_count: 2,
            white_count: 2,
        }
    }

    /// A board with no discs, for setting up positions
    pub fn empty() -> Self {
        Board {
            cells: [[Cell::Empty; SIZE]; SIZE],
            black_count: 0,
            white_count: 0,
        }
    }

    /// Build a board from a flat state array (0 = Empty, 1 = Black, 2 = White)
    pub fn from_state(state: &[u8; SQUARES]) -> Result<Self> {
        let mut board = Board::empty();
        for (index, &code) in state.iter().enumerate() {
            let cell = match code {
                0 => Cell::Empty,
                1 => Cell::Black,
                2 => Cell::White,
                other => {
                    return Err(GameError::InvalidBoard {
                        reason: format!("unknown cell code {} at index {}", other, index),
                    })
                }
            };
            board.set_cell(index / SIZE, index % SIZE, cell);
        }
        Ok(board)
    }

    /// Flat state array indexed as row * 8 + col (0 = Empty, 1 = Black, 2 = White)
    pub fn state(&self) -> [u8; SQUARES] {
        let mut state = [0u8; SQUARES];
        for row in 0..SIZE {
            for col in 0..SIZE {
                state[row * SIZE + col] = self.cells[row][col].code();
            }
        }
        state
    }

    /// Cell at (row, col). Panics when out of range, like slice indexing.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Overwrite a single cell. Intended for position setup, not for play.
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        match self.cells[row][col] {
            Cell::Black => self.black_count -= 1,
            Cell::White => self.white_count -= 1,
            Cell::Empty => {}
        }
        match cell {
            Cell::Black => self.black_count += 1,
            Cell::White => self.white_count += 1,
            Cell::Empty => {}
        }
        self.cells[row][col] = cell;
    }

    /// Mask of opponent discs flipped in direction (dr, dc) if `player` placed at (row, col).
    /// Zero unless the run of opponent discs is closed by one of `player`'s discs.
    fn flips_in_direction(&self, row: usize, col: usize, player: Player, dr: i8, dc: i8) -> u64 {
        let opponent = player.opponent().to_cell();
        let own = player.to_cell();
        let mut mask = 0u64;
        let mut pos = offset(row, col, dr, dc);

        while let Some((r, c)) = pos {
            match self.cells[r][c] {
                cell if cell == opponent => {
                    mask |= 1u64 << (r * SIZE + c);
                    pos = offset(r, c, dr, dc);
                }
                cell if cell == own => return mask,
                _ => return 0,
            }
        }

        0
    }

    /// Union of flips over all 8 directions for a placement at (row, col).
    /// Zero for occupied or out-of-range squares.
    pub fn flips_for(&self, row: usize, col: usize, player: Player) -> u64 {
        if row >= SIZE || col >= SIZE || self.cells[row][col] != Cell::Empty {
            return 0;
        }

        DIRECTIONS
            .iter()
            .fold(0u64, |acc, &(dr, dc)| acc | self.flips_in_direction(row, col, player, dr, dc))
    }

    /// The move `player` would make at (row, col), if legal
    pub fn move_at(&self, row: usize, col: usize, player: Player) -> Option<Move> {
        match self.flips_for(row, col, player) {
            0 => None,
            flips => Some(Move::new(row, col, player, flips)),
        }
    }

    /// Check if a move is valid at position (row, col)
    /// A move is valid if:
    /// 1. The cell is empty
    /// 2. Placing a piece there would flip at least one opponent piece
    pub fn is_legal_move(&self, row: usize, col: usize, player: Player) -> bool {
        self.flips_for(row, col, player) != 0
    }

    /// All legal moves for `player` in row-major order
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                if let Some(mv) = self.move_at(row, col, player) {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    pub fn legal_move_count(&self, player: Player) -> usize {
        (0..SQUARES)
            .filter(|&index| self.is_legal_move(index / SIZE, index % SIZE, player))
            .count()
    }

    pub fn has_legal_move(&self, player: Player) -> bool {
        (0..SQUARES).any(|index| self.is_legal_move(index / SIZE, index % SIZE, player))
    }

    /// Return a new board with `mv` played. The original board is unchanged.
    ///
    /// Fails when the target square is off the board or occupied, when the
    /// move flips nothing, or when its flip set differs from the one this
    /// board produces (a move computed on another position).
    pub fn apply(&self, mv: &Move) -> Result<Board> {
        let invalid = |reason| GameError::InvalidMove {
            row: mv.row,
            col: mv.col,
            reason,
        };

        if mv.row >= SIZE || mv.col >= SIZE {
            return Err(invalid("square is off the board"));
        }
        if self.cells[mv.row][mv.col] != Cell::Empty {
            return Err(invalid("target square is occupied"));
        }
        if mv.flips() == 0 {
            return Err(invalid("move flips no discs"));
        }

        if mv.flips() != self.flips_for(mv.row, mv.col, mv.player) {
            return Err(invalid("flip set does not match the board"));
        }

        let mut next = *self;
        let own = mv.player.to_cell();
        next.cells[mv.row][mv.col] = own;
        for (r, c) in mv.flipped_squares() {
            next.cells[r][c] = own;
        }

        let flipped = mv.flip_count() as u8;
        match mv.player {
            Player::Black => {
                next.black_count += flipped + 1;
                next.white_count -= flipped;
            }
            Player::White => {
                next.white_count += flipped + 1;
                next.black_count -= flipped;
            }
        }

        Ok(next)
    }

    /// Compute and apply the move at (row, col) for `player`
    pub fn play(&self, row: usize, col: usize, player: Player) -> Result<Board> {
        let mv = self.move_at(row, col, player).ok_or(GameError::InvalidMove {
            row,
            col,
            reason: "square is not a legal move",
        })?;
        self.apply(&mv)
    }

    /// Neither player has a legal move
    pub fn is_terminal(&self) -> bool {
        !self.has_legal_move(Player::Black) && !self.has_legal_move(Player::White)
    }

    /// Disc counts as (player's discs, opponent's discs)
    pub fn score_discs(&self, player: Player) -> (u8, u8) {
        match player {
            Player::Black => (self.black_count, self.white_count),
            Player::White => (self.white_count, self.black_count),
        }
    }

    pub fn disc_count(&self) -> u8 {
        self.black_count + self.white_count
    }

    pub fn empty_count(&self) -> u8 {
        SQUARES as u8 - self.disc_count()
    }

    pub fn is_full(&self) -> bool {
        self.disc_count() as usize == SQUARES
    }

    /// Number of corners held by `player`
    pub fn corners_held(&self, player: Player) -> usize {
        let own = player.to_cell();
        CORNERS
            .iter()
            .filter(|&&(r, c)| self.cells[r][c] == own)
            .count()
    }

    /// Get the winner of the game
    /// Returns Some(Player) if there's a winner, None if it's a draw or game is not over
    pub fn winner(&self) -> Option<Player> {
        if !self.is_terminal() {
            return None;
        }

        if self.black_count > self.white_count {
            Some(Player::Black)
        } else if self.white_count > self.black_count {
            Some(Player::White)
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let symbol = match self.cells[row][col] {
                    Cell::Empty => '.',
                    Cell::Black => 'B',
                    Cell::White => 'W',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = GameError;

    /// Parse 64 cells in row-major order. `.` or `-` is empty, `B`/`X` black,
    /// `W`/`O` white; whitespace is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let mut board = Board::empty();
        let mut index = 0;

        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            if index >= SQUARES {
                return Err(GameError::InvalidBoard {
                    reason: format!("more than {} cells", SQUARES),
                });
            }
            let cell = match ch {
                '.' | '-' => Cell::Empty,
                'B' | 'b' | 'X' | 'x' => Cell::Black,
                'W' | 'w' | 'O' | 'o' => Cell::White,
                other => {
                    return Err(GameError::InvalidBoard {
                        reason: format!("invalid character '{}' at cell {}", other, index),
                    })
                }
            };
            board.set_cell(index / SIZE, index % SIZE, cell);
            index += 1;
        }

        if index != SQUARES {
            return Err(GameError::InvalidBoard {
                reason: format!("expected {} cells, got {}", SQUARES, index),
            });
        }

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_new_initial_setup() {
        let board = Board::new();

        assert_eq!(board.cell(3, 3), Cell::White);
        assert_eq!(board.cell(3, 4), Cell::Black);
        assert_eq!(board.cell(4, 3), Cell::Black);
        assert_eq!(board.cell(4, 4), Cell::White);

        for i in 0..8 {
            for j in 0..8 {
                if (i, j) != (3, 3) && (i, j) != (3, 4) && (i, j) != (4, 3) && (i, j) != (4, 4) {
                    assert_eq!(board.cell(i, j), Cell::Empty);
                }
            }
        }

        assert_eq!(board.score_discs(Player::Black), (2, 2));
        assert_eq!(board.disc_count(), 4);
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_is_legal_move_initial_board() {
        let board = Board::new();

        // Valid moves for Black at start: (2,3), (3,2), (4,5), (5,4)
        assert!(board.is_legal_move(2, 3, Player::Black));
        assert!(board.is_legal_move(3, 2, Player::Black));
        assert!(board.is_legal_move(4, 5, Player::Black));
        assert!(board.is_legal_move(5, 4, Player::Black));

        // Occupied cells
        assert!(!board.is_legal_move(3, 3, Player::Black));
        assert!(!board.is_legal_move(3, 4, Player::Black));

        // Empty but no flips
        assert!(!board.is_legal_move(0, 0, Player::Black));
        assert!(!board.is_legal_move(7, 7, Player::Black));
    }

    #[test]
    fn test_legal_moves_initial_board() {
        let board = Board::new();
        let moves = board.legal_moves(Player::Black);

        let squares: Vec<_> = moves.iter().map(|m| (m.row, m.col)).collect();
        assert_eq!(squares, vec![(2, 3), (3, 2), (4, 5), (5, 4)]);
        assert!(moves.iter().all(|m| m.flip_count() == 1));
        assert_eq!(board.legal_move_count(Player::Black), 4);

        let white: Vec<_> = board
            .legal_moves(Player::White)
            .iter()
            .map(|m| (m.row, m.col))
            .collect();
        assert_eq!(white, vec![(2, 4), (3, 5), (4, 2), (5, 3)]);
    }

    #[test]
    fn test_is_legal_move_out_of_bounds() {
        let board = Board::new();
        assert!(!board.is_legal_move(8, 0, Player::Black));
        assert!(!board.is_legal_move(0, 8, Player::Black));
        assert!(!board.is_legal_move(10, 10, Player::Black));
    }

    #[test]
    fn test_apply_move_valid() {
        let board = Board::new();
        let next = board.play(2, 3, Player::Black).unwrap();

        assert_eq!(next.cell(2, 3), Cell::Black);
        assert_eq!(next.cell(3, 3), Cell::Black);
        assert_eq!(next.score_discs(Player::Black), (4, 1));

        // Original board untouched
        assert_eq!(board.cell(2, 3), Cell::Empty);
        assert_eq!(board.cell(3, 3), Cell::White);
    }

    #[test]
    fn test_apply_move_invalid() {
        let board = Board::new();

        let err = board.play(0, 0, Player::Black).unwrap_err();
        assert!(matches!(err, GameError::InvalidMove { row: 0, col: 0, .. }));

        // Occupied target
        let occupied = Move::new(3, 3, Player::Black, 1 << 28);
        assert!(matches!(
            board.apply(&occupied),
            Err(GameError::InvalidMove { reason: "target square is occupied", .. })
        ));

        // Empty flip set
        let no_flips = Move::new(2, 3, Player::Black, 0);
        assert!(matches!(
            board.apply(&no_flips),
            Err(GameError::InvalidMove { reason: "move flips no discs", .. })
        ));

        // Flip set pointing at own disc
        let own_disc = Move::new(2, 4, Player::Black, 1 << (3 * 8 + 4));
        assert!(board.apply(&own_disc).is_err());

        let off_board = Move::new(8, 0, Player::Black, 1);
        assert!(board.apply(&off_board).is_err());
    }

    #[test]
    fn test_apply_rejects_forged_flips() {
        let board = Board::new();

        // d3 only flips d4; e5 is on no line from d3
        let forged = Move::new(2, 3, Player::Black, 1 << (4 * 8 + 4));
        assert!(matches!(
            board.apply(&forged),
            Err(GameError::InvalidMove { reason: "flip set does not match the board", .. })
        ));

        // Correct flips plus an extra opponent disc
        let padded = Move::new(2, 3, Player::Black, (1 << (3 * 8 + 3)) | (1 << (4 * 8 + 4)));
        assert!(board.apply(&padded).is_err());
    }

    #[test]
    fn test_apply_rejects_stale_moves() {
        let board = Board::new();
        let stale = board.legal_moves(Player::Black);

        // Black d3, White e3
        let later = board
            .play(2, 3, Player::Black)
            .and_then(|b| b.play(2, 4, Player::White))
            .unwrap();

        for mv in &stale {
            let current = later.move_at(mv.row, mv.col, Player::Black);
            if current.map(|c| c.flips()) == Some(mv.flips()) {
                assert!(later.apply(mv).is_ok());
            } else {
                assert!(later.apply(mv).is_err(), "stale {} accepted", mv);
            }
        }

        // f5 from the opening flips only e5, but after e3 it also flips e4
        let f5 = stale.iter().find(|m| m.to_string() == "f5").unwrap();
        assert!(later.apply(f5).is_err());
        let fresh = later.play(4, 5, Player::Black).unwrap();
        assert_eq!(fresh.cell(4, 4), Cell::Black);
        assert_eq!(fresh.cell(3, 4), Cell::Black);
    }

    #[test]
    fn test_multi_direction_flips() {
        let board: Board = "
            ........
            ........
            ..B.B...
            ...W....
            ..BW.W..
            ........
            ........
            ........"
            .parse()
            .unwrap();

        // (4,4) flips (3,3) diagonally and (4,3) horizontally, but not (4,5)
        let mv = board.move_at(4, 4, Player::Black).unwrap();
        let squares: Vec<_> = mv.flipped_squares().collect();
        assert_eq!(squares, vec![(3, 3), (4, 3)]);
    }

    #[test]
    fn test_edge_run_without_closing_disc() {
        // White run reaches the edge with no black disc behind it
        let board: Board = "
            .WWWWWWW
            ........
            ........
            ........
            ........
            ........
            ........
            ........"
            .parse()
            .unwrap();

        assert!(!board.is_legal_move(0, 0, Player::Black));
        assert!(board.legal_moves(Player::Black).is_empty());
    }

    #[test]
    fn test_is_terminal_and_winner() {
        assert_eq!(Board::new().winner(), None);

        let mut board = Board::empty();
        board.set_cell(0, 0, Cell::Black);
        board.set_cell(7, 7, Cell::Black);
        board.set_cell(3, 3, Cell::White);
        assert!(board.is_terminal());
        assert_eq!(board.winner(), Some(Player::Black));

        board.set_cell(7, 7, Cell::Empty);
        assert!(board.is_terminal());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_is_full() {
        let mut board = Board::empty();
        for row in 0..8 {
            for col in 0..8 {
                let cell = if (row + col) % 2 == 0 { Cell::Black } else { Cell::White };
                board.set_cell(row, col, cell);
            }
        }
        assert!(board.is_full());
        assert_eq!(board.empty_count(), 0);
        assert!(board.is_terminal());
    }

    #[test]
    fn test_state_round_trip() {
        let board = Board::new().play(2, 3, Player::Black).unwrap();
        let state = board.state();

        assert_eq!(state[19], 1);
        assert_eq!(state[27], 1);
        assert_eq!(state[36], 2);
        assert_eq!(Board::from_state(&state).unwrap(), board);

        let mut bad = state;
        bad[5] = 7;
        assert!(matches!(
            Board::from_state(&bad),
            Err(GameError::InvalidBoard { .. })
        ));
    }

    #[test]
    fn test_parse_and_display() {
        let board = Board::new();
        let text = board.to_string();
        assert_eq!(text.lines().nth(3), Some("...WB..."));
        assert_eq!(text.parse::<Board>().unwrap(), board);

        assert!("B".parse::<Board>().is_err());
        assert!("Z".repeat(64).parse::<Board>().is_err());
        assert!(".".repeat(65).parse::<Board>().is_err());
    }

    #[test]
    fn test_set_cell_keeps_counts() {
        let mut board = Board::new();
        board.set_cell(3, 3, Cell::Black);
        assert_eq!(board.score_discs(Player::Black), (3, 1));
        board.set_cell(3, 3, Cell::Empty);
        assert_eq!(board.score_discs(Player::Black), (2, 1));
        assert_eq!(board.corners_held(Player::Black), 0);
        board.set_cell(7, 0, Cell::Black);
        assert_eq!(board.corners_held(Player::Black), 1);
    }
}
