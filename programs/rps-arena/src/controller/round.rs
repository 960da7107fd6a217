//! Round lifecycle: play, save, play again

use rps_logic::{outcome, Move};

use super::RpsController;
use crate::error::ArenaError;
use crate::state::{now, RoundPhase, RoundRecord};

impl RpsController {
    /// Validate the player's move, get the computer's reply and decide
    /// the round
    pub fn play_round(&mut self, user_choice: &str) -> Result<RoundRecord, ArenaError> {
        self.require_phase(RoundPhase::AwaitingInput)?;

        // Rejected here, before the selector sees it
        let player_move: Move = user_choice.parse()?;
        let timestamp = now();

        self.phase = RoundPhase::MoveSelected;
        let computer_move = self.selector.compute_choice(player_move, &mut self.rng);
        let result = outcome(player_move, computer_move);

        let record = RoundRecord {
            user_choice: player_move,
            computer_choice: computer_move,
            result,
            timestamp,
        };
        log::info!(
            "round: user={}, computer={}, result={}",
            player_move,
            computer_move,
            result
        );

        self.current = Some(record.clone());
        self.phase = RoundPhase::OutcomeShown;
        Ok(record)
    }

    /// Persist the current round, then let the selector learn from it.
    ///
    /// The selector is updated even if the write fails; the error is
    /// returned so the caller can report that the round was not recorded.
    pub fn save_round(&mut self) -> Result<(), ArenaError> {
        let record = self.current.take().ok_or(ArenaError::NoRoundToSave)?;

        let saved = self.store.append(record);
        match &saved {
            Ok(data) => log::info!(
                "round saved to {} ({} games)",
                self.store.path().display(),
                data.metadata.total_games
            ),
            Err(e) => log::error!("failed to save round: {}", e),
        }

        self.selector.update();
        saved.map(|_| ())
    }

    /// "Play again": back to waiting for input
    pub fn new_round(&mut self) -> Result<(), ArenaError> {
        self.require_phase(RoundPhase::OutcomeShown)?;
        if let Some(unsaved) = self.current.take() {
            log::warn!("discarding unsaved round from {}", unsaved.timestamp);
        }
        self.phase = RoundPhase::AwaitingInput;
        Ok(())
    }
}
