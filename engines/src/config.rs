//! Engine configuration and the configured engine.

use log::debug;
use othello::{Board, Move, Player};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::heuristic::{HeuristicEvaluator, HeuristicWeights};
use crate::minimax::{MinimaxPlayer, MoveOrdering, SearchResult};
use crate::positional::PositionalEvaluator;
use crate::static_player::StaticPlayer;
use crate::{Agent, Evaluator, Strategy};

/// Which evaluation function scores positions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorKind {
    /// Weighted sub-metrics, see `HeuristicWeights`
    #[default]
    Heuristic,
    /// Square-weight table
    Positional,
}

/// Configuration for an `Engine`.
///
/// Builder-style; every field has a default, so partial JSON documents are
/// accepted by `from_json`.
///
/// # Examples
///
/// ```
/// use othello_engines::{EngineConfig, MoveOrdering, Strategy};
///
/// let config = EngineConfig::new(Strategy::Minimax { depth: 4 })
///     .with_pruning(true)
///     .with_ordering(MoveOrdering::Positional);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub strategy: Strategy,
    pub evaluator: EvaluatorKind,
    /// Only used by the heuristic evaluator
    pub weights: HeuristicWeights,
    /// Alpha-beta pruning for minimax
    pub pruning: bool,
    /// Branch exploration order for minimax
    pub ordering: MoveOrdering,
}

impl EngineConfig {
    /// Configuration for `strategy` with the default heuristic and no pruning
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn with_evaluator(mut self, evaluator: EvaluatorKind) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn with_weights(mut self, weights: HeuristicWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_ordering(mut self, ordering: MoveOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the depth and weights without building an engine
    pub fn validate(&self) -> Result<()> {
        if let Strategy::Minimax { depth: 0 } = self.strategy {
            return Err(EngineError::InvalidDepth { depth: 0 });
        }
        self.weights.validate()
    }
}

/// Evaluator picked at runtime from `EvaluatorKind`
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnyEvaluator {
    Heuristic(HeuristicEvaluator),
    Positional(PositionalEvaluator),
}

impl Evaluator for AnyEvaluator {
    fn evaluate(&self, board: &Board, player: Player) -> f64 {
        match self {
            AnyEvaluator::Heuristic(e) => e.evaluate(board, player),
            AnyEvaluator::Positional(e) => e.evaluate(board, player),
        }
    }
}

#[derive(Clone, Debug)]
enum Selector {
    Static(StaticPlayer<AnyEvaluator>),
    Minimax(MinimaxPlayer<AnyEvaluator>),
}

/// A validated configuration turned into a ready player
#[derive(Clone, Debug)]
pub struct Engine {
    config: EngineConfig,
    player: Selector,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let evaluator = match config.evaluator {
            EvaluatorKind::Heuristic => AnyEvaluator::Heuristic(HeuristicEvaluator::new(config.weights)),
            EvaluatorKind::Positional => AnyEvaluator::Positional(PositionalEvaluator),
        };

        let player = match config.strategy {
            Strategy::Static => Selector::Static(StaticPlayer::new(evaluator)),
            Strategy::Minimax { depth } => Selector::Minimax(
                MinimaxPlayer::new(evaluator, depth)?
                    .with_pruning(config.pruning)
                    .with_ordering(config.ordering),
            ),
        };

        debug!("engine configured: {:?}", config);
        Ok(Self { config, player })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(EngineConfig::from_json(json)?)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate `board` for `player` with the configured evaluator
    pub fn evaluate(&self, board: &Board, player: Player) -> f64 {
        match &self.player {
            Selector::Static(p) => p.evaluator().evaluate(board, player),
            Selector::Minimax(p) => p.evaluator().evaluate(board, player),
        }
    }

    pub fn choose_move(&self, board: &Board, player: Player) -> Result<Move> {
        match &self.player {
            Selector::Static(p) => p.choose_move(board, player),
            Selector::Minimax(p) => p.choose_move(board, player),
        }
    }

    /// Full search report; `None` for the static strategy
    pub fn search(&self, board: &Board, player: Player) -> Option<Result<SearchResult>> {
        match &self.player {
            Selector::Static(_) => None,
            Selector::Minimax(p) => Some(p.search(board, player)),
        }
    }
}

impl Agent for Engine {
    fn choose_move(&self, board: &Board, player: Player) -> Result<Move> {
        Engine::choose_move(self, board, player)
    }
}
