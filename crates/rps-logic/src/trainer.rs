//! Supervised example building and model fitting

use serde::{Deserialize, Serialize};

use crate::encoder::{encode, WINDOW};
use crate::error::LogicError;
use crate::game::Move;
use crate::model::{Mlp, Sample, DEFAULT_HIDDEN};

/// A window of consecutive moves and the move that followed it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Example {
    pub window: [Move; WINDOW],
    pub label: Move,
}

/// Training policy knobs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Full-batch passes per training run
    pub epochs: u32,
    pub learning_rate: f32,
    /// Hidden layer width for newly created models
    pub hidden: usize,
    /// Only the most recent examples are fitted (0 = no limit)
    pub max_examples: usize,
}

impl TrainerConfig {
    /// 100 Adam epochs at 1e-3, hidden width 32
    pub fn standard() -> Self {
        Self {
            epochs: 100,
            learning_rate: 0.001,
            hidden: DEFAULT_HIDDEN,
            max_examples: 64,
        }
    }
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Summary of one training run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub examples: usize,
    pub epochs: u32,
    pub initial_loss: f32,
    pub final_loss: f32,
}

/// Slide a width-[`WINDOW`] window over `history` with stride 1.
///
/// Needs at least `WINDOW + 1` moves; returns nothing otherwise.
pub fn prepare_examples(history: &[Move]) -> Vec<Example> {
    if history.len() <= WINDOW {
        return Vec::new();
    }

    history
        .windows(WINDOW + 1)
        .map(|w| {
            let mut window = [Move::Rock; WINDOW];
            window.copy_from_slice(&w[..WINDOW]);
            Example { window, label: w[WINDOW] }
        })
        .collect()
}

/// Fits a model on examples built from move history
#[derive(Clone, Debug, Default)]
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Run `epochs` optimiser steps, continuing from the model's current
    /// parameters. An empty example set is a no-op.
    pub fn train(&self, model: &mut Mlp, examples: &[Example]) -> Result<TrainingReport, LogicError> {
        let start = match self.config.max_examples {
            0 => 0,
            limit => examples.len().saturating_sub(limit),
        };
        let examples = &examples[start..];

        if examples.is_empty() {
            log::debug!("not enough data to train");
            return Ok(TrainingReport::default());
        }

        let batch = examples
            .iter()
            .map(|e| encode(&e.window).map(|x| (x, e.label)))
            .collect::<Result<Vec<Sample>, LogicError>>()?;

        log::debug!("training on {} examples for {} epochs", batch.len(), self.config.epochs);

        let mut report = TrainingReport {
            examples: batch.len(),
            epochs: self.config.epochs,
            ..Default::default()
        };

        for epoch in 0..self.config.epochs {
            let loss = model.train_step(&batch, self.config.learning_rate)?;
            if epoch == 0 {
                report.initial_loss = loss;
            }
            if epoch % 20 == 0 {
                log::debug!("epoch {}, loss {:.4}", epoch, loss);
            }
        }
        report.final_loss = model.loss(&batch);
        if !report.final_loss.is_finite() {
            return Err(LogicError::NonFinite);
        }

        log::debug!(
            "training finished, loss {:.4} -> {:.4}",
            report.initial_loss,
            report.final_loss
        );
        Ok(report)
    }
}
