//! Record file and session state definitions

use std::path::Path;

use rps_logic::{Mode, Move, Outcome};
use serde::{Deserialize, Serialize};

/// Format version written into new record files
pub const DATASET_VERSION: &str = "1.0";

/// Current local time as an ISO-8601 string
pub fn now() -> String {
    chrono::Local::now().to_rfc3339()
}

/// Aggregate counters, from the computer's side of the table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub created_date: String,
    pub total_games: u64,
    pub computer_wins: u64,
    pub user_wins: u64,
    pub draws: u64,
    pub last_updated: String,
    pub version: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            created_date: String::new(),
            total_games: 0,
            computer_wins: 0,
            user_wins: 0,
            draws: 0,
            last_updated: String::new(),
            version: DATASET_VERSION.to_string(),
        }
    }
}

/// One completed round; never modified once written
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub user_choice: Move,
    pub computer_choice: Move,
    pub result: Outcome,
    pub timestamp: String,
}

/// One entry of `game_records` as found on disk.
///
/// Entries that do not parse as a round (an unknown move name, a missing
/// field) are carried through unchanged so a save never drops them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredRecord {
    Round(RoundRecord),
    Unreadable(serde_json::Value),
}

impl StoredRecord {
    pub fn round(&self) -> Option<&RoundRecord> {
        match self {
            StoredRecord::Round(r) => Some(r),
            StoredRecord::Unreadable(_) => None,
        }
    }
}

/// Whole contents of the record file
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub game_records: Vec<StoredRecord>,
}

impl Dataset {
    /// Zeroed counters, no records
    pub fn new(timestamp: &str) -> Self {
        Self {
            metadata: Metadata {
                created_date: timestamp.to_string(),
                last_updated: timestamp.to_string(),
                ..Default::default()
            },
            game_records: Vec::new(),
        }
    }

    /// Append a round and bump exactly one outcome counter
    pub fn record(&mut self, record: RoundRecord, timestamp: &str) {
        let meta = &mut self.metadata;
        meta.total_games += 1;
        match record.result {
            Outcome::ComputerWin => meta.computer_wins += 1,
            Outcome::UserWin => meta.user_wins += 1,
            Outcome::Draw => meta.draws += 1,
        }
        meta.last_updated = timestamp.to_string();
        self.game_records.push(StoredRecord::Round(record));
    }

    /// Rounds that parsed, oldest first
    pub fn rounds(&self) -> impl Iterator<Item = &RoundRecord> {
        self.game_records.iter().filter_map(StoredRecord::round)
    }

    /// Entries kept verbatim because they did not parse
    pub fn unreadable_count(&self) -> usize {
        self.game_records.len() - self.rounds().count()
    }

    /// Every readable player move on record, oldest first
    pub fn player_moves(&self) -> Vec<Move> {
        self.rounds().map(|r| r.user_choice).collect()
    }
}

/// Per-round state machine driven by the presentation layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    #[default]
    AwaitingInput,
    MoveSelected,
    OutcomeShown,
}

/// Aggregate statistics for display
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_games: u64,
    pub computer_wins: u64,
    pub user_wins: u64,
    pub draws: u64,
    pub computer_win_rate: f64,
    pub user_win_rate: f64,
    pub draw_rate: f64,
    pub dataset_filename: String,
    pub processor_mode: String,
    pub processor_type: String,
    pub created_date: String,
    pub last_updated: String,
}

impl Statistics {
    pub fn new(meta: &Metadata, dataset: &Path, mode: Mode, processor_type: &str) -> Self {
        Self {
            total_games: meta.total_games,
            computer_wins: meta.computer_wins,
            user_wins: meta.user_wins,
            draws: meta.draws,
            computer_win_rate: percentage(meta.computer_wins, meta.total_games),
            user_win_rate: percentage(meta.user_wins, meta.total_games),
            draw_rate: percentage(meta.draws, meta.total_games),
            dataset_filename: dataset.display().to_string(),
            processor_mode: mode.id().to_string(),
            processor_type: processor_type.to_string(),
            created_date: meta.created_date.clone(),
            last_updated: meta.last_updated.clone(),
        }
    }
}

/// `count / total` as a percentage rounded to two decimals; 0 when empty
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 10_000.0).round() / 100.0
}

/// Details of the active selector
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessorInfo {
    pub mode: String,
    pub processor_type: String,
    pub description: String,
    pub recent_sequence: Vec<Move>,
    pub sequence_length: usize,
    pub total_rounds: u64,
    pub trained: bool,
    pub training_runs: u32,
    pub last_loss: Option<f32>,
}
