//! Computer move selection
//!
//! Two selectors share one contract: pick a move in response to the
//! player's latest move, and optionally refit after the round is recorded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::encoder::{encode, WINDOW};
use crate::error::LogicError;
use crate::game::Move;
use crate::history::HistoryBuffer;
use crate::model::{Mlp, Prediction};
use crate::random::SeededRng;
use crate::trainer::{prepare_examples, Trainer, TrainerConfig, TrainingReport};

/// Which selector is active
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Counter the move predicted from the player's history.
    Learning,
    /// Uniform random choice every round.
    Random,
}

impl Mode {
    /// Canonical identifier
    pub fn id(self) -> &'static str {
        match self {
            Mode::Learning => "learning",
            Mode::Random => "random",
        }
    }

    /// Parse a mode identifier, falling back to [`Mode::Random`] for
    /// anything unrecognised.
    pub fn resolve(id: &str) -> Mode {
        id.parse().unwrap_or_else(|e| {
            log::warn!("{}, using random selection", e);
            Mode::Random
        })
    }
}

/// Accepts the numeric menu ids as well as the canonical names. `"2"` was
/// a pattern-matching mode that never shipped; it selects random play.
impl FromStr for Mode {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "learning" => Ok(Mode::Learning),
            "2" | "3" | "random" => Ok(Mode::Random),
            other => Err(LogicError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Snapshot of a selector's state for display
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectorInfo {
    pub mode: Mode,
    pub processor_type: String,
    pub description: String,
    pub total_rounds: u64,
    pub trained: bool,
    pub training_runs: u32,
    pub last_loss: Option<f32>,
}

/// Predicts the player's next move from their last [`WINDOW`] moves and
/// plays whatever beats it
#[derive(Clone, Debug)]
pub struct LearningSelector {
    history: HistoryBuffer,
    /// Every player move seen, oldest first; training examples come from here
    moves: Vec<Move>,
    model: Option<Mlp>,
    trainer: Trainer,
    init_rng: SeededRng,
    total_rounds: u64,
    training_runs: u32,
    last_report: Option<TrainingReport>,
}

impl LearningSelector {
    /// Build from previously recorded player moves, training immediately if
    /// a full window is already available.
    pub fn new(config: TrainerConfig, past_moves: &[Move], rng: &mut SeededRng) -> Self {
        let mut selector = Self {
            history: HistoryBuffer::from_moves(past_moves.iter().copied()),
            moves: past_moves.to_vec(),
            model: None,
            trainer: Trainer::new(config),
            init_rng: rng.fork(),
            total_rounds: past_moves.len() as u64,
            training_runs: 0,
            last_report: None,
        };

        log::info!("loaded {} past player moves", selector.history.len());
        if selector.history.len() >= WINDOW {
            selector.retrain();
        }
        selector
    }

    /// Record the player's move, then choose a response
    pub fn compute_choice(&mut self, player_move: Move, rng: &mut SeededRng) -> Move {
        self.history.append(player_move);
        self.moves.push(player_move);
        self.total_rounds += 1;

        if self.history.len() < WINDOW {
            let choice = rng.next_move();
            log::info!(
                "not enough data ({}/{}), random choice: {}",
                self.history.len(),
                WINDOW,
                choice
            );
            return choice;
        }

        match self.predict_next() {
            Ok(Some(prediction)) => {
                let choice = prediction.predicted.beaten_by();
                log::info!(
                    "predicted player move: {} (rock {:.3}, scissors {:.3}, paper {:.3}), countering with {}",
                    prediction.predicted,
                    prediction.probability_of(Move::Rock),
                    prediction.probability_of(Move::Scissors),
                    prediction.probability_of(Move::Paper),
                    choice
                );
                return choice;
            }
            Ok(None) => log::info!("no trained model yet"),
            Err(e) => log::warn!("prediction failed: {}", e),
        }

        let choice = rng.next_move();
        log::info!("fallback random choice: {}", choice);
        choice
    }

    /// Model prediction for the current window, `None` when untrained
    pub fn predict_next(&self) -> Result<Option<Prediction>, LogicError> {
        let Some(model) = &self.model else {
            return Ok(None);
        };
        let window = self.history.latest(WINDOW).ok_or(LogicError::WindowSize {
            expected: WINDOW,
            found: self.history.len(),
        })?;
        model.predict(&encode(&window)?).map(Some)
    }

    /// Refit on the full move history once there is at least one example
    pub fn update(&mut self) {
        if self.moves.len() > WINDOW {
            log::info!("new data available, retraining");
            self.retrain();
        }
    }

    fn retrain(&mut self) {
        let examples = prepare_examples(&self.moves);
        if examples.is_empty() {
            log::debug!("not enough data to train");
            return;
        }

        let hidden = self.trainer.config().hidden;
        let init_rng = &mut self.init_rng;
        let model = self.model.get_or_insert_with(|| Mlp::new(hidden, init_rng));

        match self.trainer.train(model, &examples) {
            Ok(report) => {
                log::info!(
                    "trained on {} examples, loss {:.4}",
                    report.examples,
                    report.final_loss
                );
                self.training_runs += 1;
                self.last_report = Some(report);
            }
            Err(e) => {
                log::warn!("training failed, discarding model: {}", e);
                self.model = None;
                self.last_report = None;
            }
        }
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn recent_sequence(&self) -> Vec<Move> {
        self.history.snapshot()
    }

    pub fn last_report(&self) -> Option<&TrainingReport> {
        self.last_report.as_ref()
    }
}

/// Uniform random choice, ignoring history
#[derive(Clone, Debug, Default)]
pub struct RandomSelector {
    total_rounds: u64,
}

impl RandomSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compute_choice(&mut self, _player_move: Move, rng: &mut SeededRng) -> Move {
        self.total_rounds += 1;
        let choice = rng.next_move();
        log::info!("random choice: {}", choice);
        choice
    }
}

/// The active selector
#[derive(Clone, Debug)]
pub enum Selector {
    Learning(LearningSelector),
    Random(RandomSelector),
}

impl Selector {
    pub fn new(mode: Mode, config: TrainerConfig, past_moves: &[Move], rng: &mut SeededRng) -> Self {
        match mode {
            Mode::Learning => Selector::Learning(LearningSelector::new(config, past_moves, rng)),
            Mode::Random => Selector::Random(RandomSelector::new()),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Selector::Learning(_) => Mode::Learning,
            Selector::Random(_) => Mode::Random,
        }
    }

    pub fn compute_choice(&mut self, player_move: Move, rng: &mut SeededRng) -> Move {
        match self {
            Selector::Learning(s) => s.compute_choice(player_move, rng),
            Selector::Random(s) => s.compute_choice(player_move, rng),
        }
    }

    /// Called after a round is complete
    pub fn update(&mut self) {
        match self {
            Selector::Learning(s) => s.update(),
            Selector::Random(_) => {}
        }
    }

    pub fn recent_sequence(&self) -> Vec<Move> {
        match self {
            Selector::Learning(s) => s.recent_sequence(),
            Selector::Random(_) => Vec::new(),
        }
    }

    pub fn info(&self) -> SelectorInfo {
        match self {
            Selector::Learning(s) => SelectorInfo {
                mode: Mode::Learning,
                processor_type: "LearningSelector".to_string(),
                description: describe_selector(Mode::Learning),
                total_rounds: s.total_rounds,
                trained: s.is_trained(),
                training_runs: s.training_runs,
                last_loss: s.last_report.as_ref().map(|r| r.final_loss),
            },
            Selector::Random(s) => SelectorInfo {
                mode: Mode::Random,
                processor_type: "RandomSelector".to_string(),
                description: describe_selector(Mode::Random),
                total_rounds: s.total_rounds,
                trained: false,
                training_runs: 0,
                last_loss: None,
            },
        }
    }
}

/// Human-readable description of a selector mode
pub fn describe_selector(mode: Mode) -> String {
    match mode {
        Mode::Learning => format!(
            "Neural predictor over your last {} moves; plays the counter to its guess.",
            WINDOW
        ),
        Mode::Random => "Picks rock, scissors or paper uniformly at random.".to_string(),
    }
}
