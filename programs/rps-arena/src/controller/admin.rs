//! Mode switching and reporting

use rps_logic::{Mode, Selector};

use super::RpsController;
use crate::error::ArenaError;
use crate::state::{ProcessorInfo, Statistics};

impl RpsController {
    /// Counters and win rates from the record file
    pub fn statistics(&self) -> Statistics {
        let data = self.store.load();
        let info = self.selector.info();
        Statistics::new(&data.metadata, self.store.path(), info.mode, &info.processor_type)
    }

    /// Switch selector. Unknown ids are rejected and the current selector
    /// is kept; a known id rebuilds the selector from the record file.
    pub fn change_mode(&mut self, mode_id: &str) -> Result<(), ArenaError> {
        let mode: Mode = mode_id.parse()?;

        self.selector = Selector::new(
            mode,
            self.config.trainer.clone(),
            &self.store.player_moves(),
            &mut self.rng,
        );
        self.config.mode = mode.id().to_string();

        log::info!("switched to mode {}", mode);
        Ok(())
    }

    pub fn processor_info(&self) -> ProcessorInfo {
        let info = self.selector.info();
        let recent_sequence = self.selector.recent_sequence();
        ProcessorInfo {
            mode: info.mode.id().to_string(),
            processor_type: info.processor_type,
            description: info.description,
            sequence_length: recent_sequence.len(),
            recent_sequence,
            total_rounds: info.total_rounds,
            trained: info.trained,
            training_runs: info.training_runs,
            last_loss: info.last_loss,
        }
    }
}
