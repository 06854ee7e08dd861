//! Minimax Player - Explicit-Stack Adversarial Search
//!
//! Algorithm: depth-bounded minimax over a `Vec` of frames instead of the call
//! stack, with optional alpha-beta pruning.
//!
//! Algorithm Details:
//! - The root frame holds the root player's legal moves as pending branches
//! - The top frame hands out one pending branch at a time; the child board is
//!   built only when the branch is explored, so at most depth x branching
//!   boards are alive at once
//! - A child at depth 0, or with no legal move for either side, is a leaf
//!   scored by the evaluator from the root player's perspective
//! - A side with no legal move while its opponent has one passes: the frame
//!   gets a single `Pass` branch with the same board
//! - A frame with no pending branches is complete; its value is backed up
//!   into the parent with max (maximizing parent) or min (minimizing parent)
//! - Values backed up into the root pick the move: the highest value wins and
//!   ties go to the lowest row-major square, whatever order branches ran in
//!
//! Alpha-beta pruning:
//! - Children start with the parent's current (alpha, beta) window
//! - Maximizing frames raise alpha, minimizing frames lower beta
//! - Remaining branches are dropped once alpha > beta. The comparison is
//!   strict so values equal to a window bound stay exact, and the chosen
//!   move and value match the unpruned search.

use log::{debug, trace};
use othello::{Board, Move, Player};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::positional::square_weight;
use crate::{Agent, Evaluator};

/// Order in which a frame explores its moves
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOrdering {
    /// Row-major square order, as generated
    #[default]
    RowMajor,
    /// Highest square weight first (corners before X-squares), which prunes more
    Positional,
}

impl MoveOrdering {
    fn sort(&self, moves: &mut [Move]) {
        match self {
            MoveOrdering::RowMajor => {}
            MoveOrdering::Positional => {
                moves.sort_by_key(|mv| std::cmp::Reverse(square_weight(mv.row, mv.col)))
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Branch {
    Play(Move),
    Pass,
}

#[derive(Debug)]
struct Frame {
    board: Board,
    to_move: Player,
    depth: usize,
    maximizing: bool,
    value: f64,
    alpha: f64,
    beta: f64,
    /// Unexplored branches, next one at the end
    pending: Vec<Branch>,
    /// Root move this frame descends from; `None` only for the root itself
    root_move: Option<Move>,
}

impl Frame {
    fn new(board: Board, to_move: Player, depth: usize, maximizing: bool) -> Self {
        Frame {
            board,
            to_move,
            depth,
            maximizing,
            value: if maximizing { f64::NEG_INFINITY } else { f64::INFINITY },
            alpha: f64::NEG_INFINITY,
            beta: f64::INFINITY,
            pending: Vec::new(),
            root_move: None,
        }
    }

    /// Child frame for `board`, one ply deeper, with the other side to move
    fn child(&self, board: Board, root_move: Option<Move>) -> Frame {
        Frame {
            alpha: self.alpha,
            beta: self.beta,
            root_move,
            ..Frame::new(board, self.to_move.opponent(), self.depth - 1, !self.maximizing)
        }
    }

    /// Fold a child's value into this frame
    fn absorb(&mut self, value: f64, pruning: bool) {
        if self.maximizing {
            self.value = self.value.max(value);
            if pruning {
                self.alpha = self.alpha.max(self.value);
            }
        } else {
            self.value = self.value.min(value);
            if pruning {
                self.beta = self.beta.min(self.value);
            }
        }

        if pruning && self.alpha > self.beta {
            self.pending.clear();
        }
    }
}

enum Opened {
    Leaf(f64),
    Frame(Frame),
}

/// Node counts for one search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Frames and leaves created, root included
    pub nodes: u64,
    /// Positions scored by the evaluator
    pub leaves: u64,
    /// Deepest the frame stack got
    pub max_stack_depth: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Backed-up minimax value of `best_move`, from the root player's side
    pub value: f64,
    pub stats: SearchStats,
}

#[derive(Clone, Debug)]
pub struct MinimaxPlayer<E> {
    evaluator: E,
    depth: usize,
    pruning: bool,
    ordering: MoveOrdering,
    /// Per-square sort keys replacing the configured order in tests
    #[cfg(test)]
    square_keys: Option<Vec<u64>>,
}

impl<E: Evaluator> MinimaxPlayer<E> {
    /// Plain minimax to `depth` plies, row-major branch order.
    /// A depth of 0 is rejected.
    pub fn new(evaluator: E, depth: usize) -> Result<Self> {
        if depth == 0 {
            return Err(EngineError::InvalidDepth { depth });
        }
        Ok(Self {
            evaluator,
            depth,
            pruning: false,
            ordering: MoveOrdering::default(),
            #[cfg(test)]
            square_keys: None,
        })
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_ordering(mut self, ordering: MoveOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// The move maximizing the backed-up value for `player`
    pub fn choose_move(&self, board: &Board, player: Player) -> Result<Move> {
        self.search(board, player).map(|result| result.best_move)
    }

    /// Run the search and report the chosen move, its value and node counts
    pub fn search(&self, board: &Board, player: Player) -> Result<SearchResult> {
        let mut root_moves = board.legal_moves(player);
        if root_moves.is_empty() {
            return Err(EngineError::NoLegalMove { player });
        }
        self.order(&mut root_moves);

        let mut root = Frame::new(*board, player, self.depth, true);
        root.pending = root_moves.into_iter().rev().map(Branch::Play).collect();

        let mut stats = SearchStats {
            nodes: 1,
            leaves: 0,
            max_stack_depth: 1,
        };
        let mut best: Option<(Move, f64)> = None;
        let mut stack = vec![root];

        while let Some(top) = stack.last_mut() {
            let Some(branch) = top.pending.pop() else {
                if let Some(done) = stack.pop() {
                    self.back_up(&mut stack, done.value, done.root_move, &mut best);
                }
                continue;
            };

            let child = match branch {
                Branch::Play(mv) => {
                    let next = top.board.apply(&mv)?;
                    top.child(next, top.root_move.or(Some(mv)))
                }
                Branch::Pass => top.child(top.board, top.root_move),
            };
            stats.nodes += 1;

            let root_move = child.root_move;
            match self.open(child, player) {
                Opened::Leaf(value) => {
                    stats.leaves += 1;
                    self.back_up(&mut stack, value, root_move, &mut best);
                }
                Opened::Frame(frame) => {
                    stack.push(frame);
                    stats.max_stack_depth = stats.max_stack_depth.max(stack.len());
                }
            }
        }

        let (best_move, value) = best.ok_or(EngineError::NoLegalMove { player })?;
        debug!(
            "minimax depth {} for {}: {} (value {:.3}), {} nodes, {} leaves",
            self.depth, player, best_move, value, stats.nodes, stats.leaves
        );

        Ok(SearchResult {
            best_move,
            value,
            stats,
        })
    }

    fn order(&self, moves: &mut [Move]) {
        self.ordering.sort(moves);

        #[cfg(test)]
        if let Some(keys) = &self.square_keys {
            moves.sort_by_key(|mv| keys[mv.index()]);
        }
    }

    /// Score a leaf, or fill in the branches of an interior frame
    fn open(&self, mut frame: Frame, root_player: Player) -> Opened {
        if frame.depth == 0 {
            return Opened::Leaf(self.evaluator.evaluate(&frame.board, root_player));
        }

        let mut moves = frame.board.legal_moves(frame.to_move);
        if moves.is_empty() {
            if !frame.board.has_legal_move(frame.to_move.opponent()) {
                return Opened::Leaf(self.evaluator.evaluate(&frame.board, root_player));
            }
            frame.pending.push(Branch::Pass);
        } else {
            self.order(&mut moves);
            frame.pending = moves.into_iter().rev().map(Branch::Play).collect();
        }

        Opened::Frame(frame)
    }

    /// Fold `value` into the frame on top of the stack, recording root choices
    fn back_up(
        &self,
        stack: &mut [Frame],
        value: f64,
        root_move: Option<Move>,
        best: &mut Option<(Move, f64)>,
    ) {
        let at_root = stack.len() == 1;
        let Some(parent) = stack.last_mut() else {
            return;
        };

        if at_root {
            if let Some(mv) = root_move {
                trace!("root move {} backed up {:.3}", mv, value);
                let better = match best {
                    None => true,
                    Some((best_move, best_value)) => {
                        value > *best_value
                            || (value == *best_value && mv.index() < best_move.index())
                    }
                };
                if better {
                    *best = Some((mv, value));
                }
            }
        }

        parent.absorb(value, self.pruning);
    }
}

impl<E: Evaluator> Agent for MinimaxPlayer<E> {
    fn choose_move(&self, board: &Board, player: Player) -> Result<Move> {
        MinimaxPlayer::choose_move(self, board, player)
    }
}
