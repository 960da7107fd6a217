//! RPS Arena - rock-paper-scissors against a learning opponent
//!
//! A local game session: the controller validates the player's move, asks
//! the active selector for the computer's reply, decides the round and
//! appends it to a JSON record file. The learning selector is retrained
//! from the record after every round.

mod config;
mod controller;
mod error;
mod state;
mod store;

pub mod logging;

pub use config::{ArenaConfig, DEFAULT_DATASET, DEFAULT_MODE};
pub use controller::RpsController;
pub use error::ArenaError;
pub use state::{
    now, percentage, Dataset, Metadata, ProcessorInfo, RoundPhase, RoundRecord, Statistics,
    StoredRecord, DATASET_VERSION,
};
pub use store::RecordStore;
