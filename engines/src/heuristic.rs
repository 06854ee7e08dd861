//! Multi-factor heuristic evaluation
//!
//! Each sub-metric is a pure function returning a value in `[-100, 100]` from
//! `player`'s point of view, and each is antisymmetric: swapping the player
//! negates the result exactly. `HeuristicEvaluator` combines them with the
//! fixed weights in `HeuristicWeights`.
//!
//! Sub-metrics:
//! 1. Disc parity (normalized difference in disc counts)
//! 2. Mobility (normalized difference in legal move counts)
//! 3. Potential mobility (empty squares bordering the other side's discs)
//! 4. Corner occupancy
//! 5. Corner-adjacent penalty (C- and X-squares next to an empty corner)
//! 6. Corner lines (how the runs leading away from an empty corner end)
//! 7. Edge stability (edge discs away from empty corners)
//! 8. Disc stability (runs along the four axes)
//!
//! Weights follow the corner/mobility/stability analysis of
//! Sannidhanam & Annamalai, "An Analysis of Heuristics in Othello", with disc
//! parity growing in importance as the board fills up.

use othello::{offset, Board, Cell, Player, CORNERS, DIRECTIONS, SIZE, SQUARES};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::Evaluator;

/// The four line axes used for disc stability
const AXES: [(i8, i8); 4] = [(1, 0), (-1, 1), (0, 1), (1, 1)];

/// Weight of a C-square next to an empty corner
const C_SQUARE_WEIGHT: f64 = 1.0;

/// Weight of an X-square next to an empty corner
const X_SQUARE_WEIGHT: f64 = 2.0;

/// Value of a single corner in the corner occupancy metric
const CORNER_VALUE: f64 = 25.0;

/// Value of one weighted C/X-square unit; 4 corners * (1 + 1 + 2) units span 100
const ADJACENT_VALUE: f64 = 6.25;

/// Corner line classes: run ends on an empty square, on the capturing side's
/// disc, or at the far edge
const UNLIKELY_LINE_WEIGHT: f64 = 40.0;
const POTENTIAL_LINE_WEIGHT: f64 = 30.0;
const IRREVERSIBLE_LINE_WEIGHT: f64 = 15.0;

/// `100 * (own - opp) / (own + opp)`, or 0 when both are zero
fn ratio(own: f64, opp: f64) -> f64 {
    if own + opp == 0.0 {
        0.0
    } else {
        100.0 * (own - opp) / (own + opp)
    }
}

/// Direction from a corner towards the board interior
fn inward(corner: (usize, usize)) -> (i8, i8) {
    let dr = if corner.0 == 0 { 1 } else { -1 };
    let dc = if corner.1 == 0 { 1 } else { -1 };
    (dr, dc)
}

/// The two C-squares (orthogonal neighbours) of a corner
fn c_squares(corner: (usize, usize)) -> [(usize, usize); 2] {
    let (dr, dc) = inward(corner);
    [
        (corner.0, (corner.1 as i8 + dc) as usize),
        ((corner.0 as i8 + dr) as usize, corner.1),
    ]
}

/// The X-square (diagonal neighbour) of a corner
fn x_square(corner: (usize, usize)) -> (usize, usize) {
    let (dr, dc) = inward(corner);
    ((corner.0 as i8 + dr) as usize, (corner.1 as i8 + dc) as usize)
}

fn is_corner(row: usize, col: usize) -> bool {
    CORNERS.contains(&(row, col))
}

fn is_edge(row: usize, col: usize) -> bool {
    row == 0 || col == 0 || row == SIZE - 1 || col == SIZE - 1
}

/// Disc parity: normalized difference in disc counts
pub fn disc_parity(board: &Board, player: Player) -> f64 {
    let (own, opp) = board.score_discs(player);
    ratio(own as f64, opp as f64)
}

/// Mobility: normalized difference in legal move counts, 0 when neither side can move
pub fn mobility(board: &Board, player: Player) -> f64 {
    let own = board.legal_move_count(player);
    let opp = board.legal_move_count(player.opponent());
    ratio(own as f64, opp as f64)
}

/// Potential mobility: empty squares next to an opponent disc are future
/// options for `player`, and the other way round
pub fn potential_mobility(board: &Board, player: Player) -> f64 {
    let own_cell = player.to_cell();
    let opp_cell = player.opponent().to_cell();
    let mut own = 0u32;
    let mut opp = 0u32;

    for index in 0..SQUARES {
        let (row, col) = (index / SIZE, index % SIZE);
        if board.cell(row, col) != Cell::Empty {
            continue;
        }
        let (mut near_opp, mut near_own) = (false, false);
        for (r, c) in DIRECTIONS
            .iter()
            .filter_map(|&(dr, dc)| offset(row, col, dr, dc))
        {
            let cell = board.cell(r, c);
            near_opp |= cell == opp_cell;
            near_own |= cell == own_cell;
        }
        own += near_opp as u32;
        opp += near_own as u32;
    }

    ratio(own as f64, opp as f64)
}

/// Corner occupancy: a fixed value per corner held, negative for the opponent's corners
pub fn corners(board: &Board, player: Player) -> f64 {
    let own = board.corners_held(player) as f64;
    let opp = board.corners_held(player.opponent()) as f64;
    CORNER_VALUE * (own - opp)
}

/// Corner-adjacent penalty: discs on the C- and X-squares of an empty corner
/// can hand that corner to the other side. Squares next to an occupied corner
/// are not counted.
pub fn corner_adjacency(board: &Board, player: Player) -> f64 {
    let own_cell = player.to_cell();
    let opp_cell = player.opponent().to_cell();
    let mut own = 0.0;
    let mut opp = 0.0;

    for corner in CORNERS {
        if board.cell(corner.0, corner.1) != Cell::Empty {
            continue;
        }
        let [c1, c2] = c_squares(corner);
        let weighted = [
            (c1, C_SQUARE_WEIGHT),
            (c2, C_SQUARE_WEIGHT),
            (x_square(corner), X_SQUARE_WEIGHT),
        ];
        for ((r, c), weight) in weighted {
            match board.cell(r, c) {
                cell if cell == own_cell => own += weight,
                cell if cell == opp_cell => opp += weight,
                _ => {}
            }
        }
    }

    // Occupying these squares is bad, so the sign is reversed
    ADJACENT_VALUE * (opp - own)
}

/// Corner lines: for each empty corner, follow every line leaving it. A run
/// of one color starting next to the corner is classified by what ends it:
/// - an empty square: the corner is unlikely to fall along this line, credit
///   to the run's owner
/// - a disc of the other color: that side can take the corner by flipping
///   the run, credit to the capturing side
/// - the board edge: the run cannot be bracketed, credit to the run's owner
///
/// Each class is a ratio of line counts; the result is their weighted mean.
pub fn corner_lines(board: &Board, player: Player) -> f64 {
    // (own, opp) per class: unlikely, potential, irreversible
    let mut counts = [(0u32, 0u32); 3];

    for corner in CORNERS {
        if board.cell(corner.0, corner.1) != Cell::Empty {
            continue;
        }
        for (dr, dc) in DIRECTIONS {
            let Some((r, c)) = offset(corner.0, corner.1, dr, dc) else {
                continue;
            };
            let Some(owner) = board.cell(r, c).owner() else {
                continue;
            };

            let (class, credited) = match run_end(board, corner.0, corner.1, dr, dc, owner.to_cell()) {
                Some(Cell::Empty) => (0, owner),
                Some(_) => (1, owner.opponent()),
                None => (2, owner),
            };
            if credited == player {
                counts[class].0 += 1;
            } else {
                counts[class].1 += 1;
            }
        }
    }

    let [unlikely, potential, irreversible] = counts.map(|(own, opp)| ratio(own as f64, opp as f64));
    (UNLIKELY_LINE_WEIGHT * unlikely
        + POTENTIAL_LINE_WEIGHT * potential
        + IRREVERSIBLE_LINE_WEIGHT * irreversible)
        / (UNLIKELY_LINE_WEIGHT + POTENTIAL_LINE_WEIGHT + IRREVERSIBLE_LINE_WEIGHT)
}

/// Edge stability: discs on non-corner edge squares, excluding the C-squares
/// of corners that are still empty
pub fn edge_stability(board: &Board, player: Player) -> f64 {
    let exposed: Vec<(usize, usize)> = CORNERS
        .iter()
        .filter(|&&(r, c)| board.cell(r, c) == Cell::Empty)
        .flat_map(|&corner| c_squares(corner))
        .collect();

    let own_cell = player.to_cell();
    let opp_cell = player.opponent().to_cell();
    let mut own = 0u32;
    let mut opp = 0u32;

    for index in 0..SQUARES {
        let (row, col) = (index / SIZE, index % SIZE);
        if !is_edge(row, col) || is_corner(row, col) || exposed.contains(&(row, col)) {
            continue;
        }
        match board.cell(row, col) {
            cell if cell == own_cell => own += 1,
            cell if cell == opp_cell => opp += 1,
            _ => {}
        }
    }

    ratio(own as f64, opp as f64)
}

/// First cell past the run of `cell` discs starting next to (row, col).
/// `None` when the run reaches the board edge.
fn run_end(board: &Board, row: usize, col: usize, dr: i8, dc: i8, cell: Cell) -> Option<Cell> {
    let mut pos = offset(row, col, dr, dc);
    while let Some((r, c)) = pos {
        let next = board.cell(r, c);
        if next != cell {
            return Some(next);
        }
        pos = offset(r, c, dr, dc);
    }
    None
}

/// Stability of one disc: 2 stable, 1 semi-stable, 0 unstable
fn disc_stability_at(board: &Board, row: usize, col: usize) -> u32 {
    let cell = board.cell(row, col);
    let mut value = 2;

    for (dr, dc) in AXES {
        let Some(forward) = run_end(board, row, col, dr, dc, cell) else {
            continue;
        };
        let Some(backward) = run_end(board, row, col, -dr, -dc, cell) else {
            continue;
        };
        if forward != backward {
            return 0;
        }
        value = 1;
    }

    value
}

/// Disc stability: a disc is stable along an axis when its run touches the
/// edge, semi-stable when both ends of the run match, and unstable when one
/// end is empty and the other holds an opponent disc
pub fn disc_stability(board: &Board, player: Player) -> f64 {
    let mut own = 0u32;
    let mut opp = 0u32;

    for index in 0..SQUARES {
        let (row, col) = (index / SIZE, index % SIZE);
        match board.cell(row, col).owner() {
            Some(owner) if owner == player => own += disc_stability_at(board, row, col),
            Some(_) => opp += disc_stability_at(board, row, col),
            None => {}
        }
    }

    ratio(own as f64, opp as f64)
}

/// Fixed weights for each sub-metric
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Disc parity weight at the opening position
    pub parity_opening: f64,
    /// Disc parity weight on a full board
    pub parity_endgame: f64,
    pub mobility: f64,
    pub potential_mobility: f64,
    pub corners: f64,
    pub corner_adjacency: f64,
    pub corner_lines: f64,
    pub edges: f64,
    pub stability: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            parity_opening: 5.0,
            parity_endgame: 25.0,
            mobility: 5.0,
            potential_mobility: 5.0,
            corners: 30.0,
            corner_adjacency: 15.0,
            corner_lines: 5.0,
            edges: 5.0,
            stability: 15.0,
        }
    }
}

impl HeuristicWeights {
    /// Disc parity weight, interpolated by the fraction of the game played
    pub fn parity_weight(&self, board: &Board) -> f64 {
        let played = board.disc_count().saturating_sub(4) as f64;
        let progress = (played / (SQUARES - 4) as f64).min(1.0);
        self.parity_opening + (self.parity_endgame - self.parity_opening) * progress
    }

    /// Reject negative, NaN or infinite weights
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("parity_opening", self.parity_opening),
            ("parity_endgame", self.parity_endgame),
            ("mobility", self.mobility),
            ("potential_mobility", self.potential_mobility),
            ("corners", self.corners),
            ("corner_adjacency", self.corner_adjacency),
            ("corner_lines", self.corner_lines),
            ("edges", self.edges),
            ("stability", self.stability),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

/// Weighted sum of all sub-metrics
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeuristicEvaluator {
    weights: HeuristicWeights,
}

impl HeuristicEvaluator {
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, board: &Board, player: Player) -> f64 {
        let w = &self.weights;
        w.parity_weight(board) * disc_parity(board, player)
            + w.mobility * mobility(board, player)
            + w.potential_mobility * potential_mobility(board, player)
            + w.corners * corners(board, player)
            + w.corner_adjacency * corner_adjacency(board, player)
            + w.corner_lines * corner_lines(board, player)
            + w.edges * edge_stability(board, player)
            + w.stability * disc_stability(board, player)
    }
}
