//! Game session controller
//!
//! Owns the record store, the active selector and the round state machine.

mod admin;
mod round;


use rps_logic::{Mode, Selector, SeededRng};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::state::{RoundPhase, RoundRecord};
use crate::store::RecordStore;

/// One local game session
#[derive(Debug)]
pub struct RpsController {
    config: ArenaConfig,
    store: RecordStore,
    selector: Selector,
    rng: SeededRng,
    phase: RoundPhase,
    current: Option<RoundRecord>,
}

impl RpsController {
    /// Open the record file and build the selector named by `config.mode`,
    /// primed with every player move on record
    pub fn new(config: ArenaConfig, seed: u64) -> Result<Self, ArenaError> {
        let store = RecordStore::open(&config.dataset)?;
        let mode = Mode::resolve(&config.mode);
        let mut rng = SeededRng::new(seed);
        let selector = Selector::new(mode, config.trainer.clone(), &store.player_moves(), &mut rng);

        log::info!(
            "session ready: records {}, mode {}",
            store.path().display(),
            mode
        );

        Ok(Self {
            config,
            store,
            selector,
            rng,
            phase: RoundPhase::AwaitingInput,
            current: None,
        })
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.selector.mode()
    }

    /// The round played but not yet saved, if any
    pub fn current_round(&self) -> Option<&RoundRecord> {
        self.current.as_ref()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    fn require_phase(&self, expected: RoundPhase) -> Result<(), ArenaError> {
        if self.phase != expected {
            return Err(ArenaError::InvalidState {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }
}
