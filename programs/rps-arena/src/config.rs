//! Session configuration

use std::path::PathBuf;

use log::LevelFilter;
use rps_logic::TrainerConfig;

/// Record file used when none is given
pub const DEFAULT_DATASET: &str = "dataset/solve1/jsq.json";

/// Selector mode used when none is given
pub const DEFAULT_MODE: &str = "1";

/// Everything needed to start a session
#[derive(Clone, Debug, PartialEq)]
pub struct ArenaConfig {
    /// Path of the JSON record file
    pub dataset: PathBuf,
    /// Selector mode identifier; unknown ids fall back to random play
    pub mode: String,
    pub trainer: TrainerConfig,
    /// Terminal log level (`off`, `error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,
    /// Directory for the debug log file, `None` disables it
    pub log_dir: Option<PathBuf>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from(DEFAULT_DATASET),
            mode: DEFAULT_MODE.to_string(),
            trainer: TrainerConfig::standard(),
            log_level: "info".to_string(),
            log_dir: Some(PathBuf::from("logs")),
        }
    }
}

impl ArenaConfig {
    /// Parsed terminal log level, `Info` if unparseable
    pub fn level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
