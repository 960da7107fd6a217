//! Logger setup for the binary

use std::fs::{self, File};
use std::path::Path;

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, SharedLogger, TermLogger, TerminalMode, WriteLogger};

use crate::error::ArenaError;

/// Terminal logging at `level`, plus a timestamped DEBUG file under
/// `log_dir` when one is given.
pub fn init(level: LevelFilter, log_dir: Option<&Path>) -> Result<(), ArenaError> {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if let Some(dir) = log_dir {
        fs::create_dir_all(dir).map_err(|source| ArenaError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let path = dir.join(format!("{}.log", stamp));
        let file = File::create(&path).map_err(|source| ArenaError::Io { path, source })?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, config, file));
    }

    CombinedLogger::init(loggers)?;
    Ok(())
}
