//! JSON record file of completed rounds
//!
//! The file is read once when the session starts and rewritten
//! (load, modify, save) after every round. A single writer is assumed.
//! Rewrites never discard existing content: entries that fail to parse are
//! written back verbatim, and a file that is not JSON at all is moved aside
//! before a fresh one replaces it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rps_logic::Move;

use crate::error::ArenaError;
use crate::state::{now, Dataset, RoundRecord};

/// Handle to the record file on disk
#[derive(Clone, Debug)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Open the record file, creating parent directories and an empty
    /// dataset if it does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ArenaError> {
        let store = Self { path: path.into() };

        if let Some(dir) = store.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| ArenaError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        if !store.path.exists() {
            store.save(&Dataset::new(&now()))?;
            log::info!("created new record file {}", store.path.display());
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Strict read: any I/O or parse problem is an error
    pub fn try_load(&self) -> Result<Dataset, ArenaError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| ArenaError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ArenaError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Read the dataset, substituting a fresh empty one if the file is
    /// missing or unreadable
    pub fn load(&self) -> Dataset {
        match self.try_load() {
            Ok(data) => {
                let skipped = data.unreadable_count();
                if skipped > 0 {
                    log::warn!(
                        "{} unreadable entries in {}, ignoring them",
                        skipped,
                        self.path.display()
                    );
                }
                data
            }
            Err(e) => {
                log::warn!("failed to load records, starting empty: {}", e);
                Dataset::new(&now())
            }
        }
    }

    /// Write the whole dataset as pretty-printed JSON
    pub fn save(&self, data: &Dataset) -> Result<(), ArenaError> {
        let raw = serde_json::to_string_pretty(data).map_err(|source| ArenaError::Json {
            path: self.path.clone(),
            source,
        })?;

        // write beside the target, then swap in
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|source| ArenaError::Io {
                path: self.path.clone(),
                source,
            })
    }

    /// Load, append one round, save. Returns the updated dataset.
    ///
    /// A missing file starts a new dataset; a file that is not valid JSON is
    /// renamed aside first. Any other read error aborts without writing.
    pub fn append(&self, record: RoundRecord) -> Result<Dataset, ArenaError> {
        let mut data = match self.try_load() {
            Ok(data) => data,
            Err(ArenaError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Dataset::new(&now())
            }
            Err(ArenaError::Json { source, .. }) => {
                let backup = self.set_aside()?;
                log::warn!(
                    "record file was not valid JSON ({}), moved to {}",
                    source,
                    backup.display()
                );
                Dataset::new(&now())
            }
            Err(e) => return Err(e),
        };
        data.record(record, &now());
        self.save(&data)?;
        log::debug!("round saved to {}", self.path.display());
        Ok(data)
    }

    /// All recorded player moves, oldest first
    pub fn player_moves(&self) -> Vec<Move> {
        self.load().player_moves()
    }

    /// Rename the current file to `<name>.json.corrupt-<timestamp>`
    fn set_aside(&self) -> Result<PathBuf, ArenaError> {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let backup = self.path.with_extension(format!("json.corrupt-{}", stamp));
        fs::rename(&self.path, &backup).map_err(|source| ArenaError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(backup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rps_logic::{outcome, Outcome};
    use tempfile::TempDir;

    fn round(user: Move, computer: Move) -> RoundRecord {
        RoundRecord {
            user_choice: user,
            computer_choice: computer,
            result: outcome(user, computer),
            timestamp: now(),
        }
    }

    #[test]
    fn test_open_creates_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("solve1").join("records.json");

        let store = RecordStore::open(&path).unwrap();

        assert!(path.exists());
        let data = store.try_load().unwrap();
        assert_eq!(data.metadata.total_games, 0);
        assert!(data.game_records.is_empty());
    }

    #[test]
    fn test_open_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");

        let store = RecordStore::open(&path).unwrap();
        store.append(round(Move::Rock, Move::Paper)).unwrap();

        let reopened = RecordStore::open(&path).unwrap();
        assert_eq!(reopened.load().metadata.total_games, 1);
    }

    #[test]
    fn test_append_counts_sum_to_total() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path().join("records.json")).unwrap();

        let n = 12;
        for i in 0..n {
            store.append(round(Move::ALL[i % 3], Move::ALL[(i / 3) % 3])).unwrap();
        }

        let meta = store.load().metadata;
        assert_eq!(meta.total_games, n as u64);
        assert_eq!(meta.computer_wins + meta.user_wins + meta.draws, n as u64);
        assert_eq!(store.player_moves().len(), n);
    }

    #[test]
    fn test_player_moves_in_order() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path().join("records.json")).unwrap();

        store.append(round(Move::Paper, Move::Rock)).unwrap();
        store.append(round(Move::Scissors, Move::Rock)).unwrap();

        assert_eq!(store.player_moves(), vec![Move::Paper, Move::Scissors]);
        let data = store.load();
        let results: Vec<Outcome> = data.rounds().map(|r| r.result).collect();
        assert_eq!(results, vec![Outcome::UserWin, Outcome::ComputerWin]);
    }

    #[test]
    fn test_append_keeps_unreadable_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        let raw = r#"{
            "metadata": {"created_date": "t0", "total_games": 3, "computer_wins": 1,
                         "user_wins": 1, "draws": 1, "last_updated": "t3", "version": "1.0"},
            "game_records": [
                {"user_choice": "rock", "computer_choice": "paper",
                 "result": "computer_win", "timestamp": "t1"},
                {"user_choice": "paper", "computer_choice": "rock",
                 "result": "user_win", "timestamp": "t2"},
                {"user_choice": "lizard", "computer_choice": "rock",
                 "result": "draw", "timestamp": "t3"}
            ]
        }"#;
        fs::write(&path, raw).unwrap();

        let store = RecordStore::open(&path).unwrap();
        assert_eq!(store.player_moves(), vec![Move::Rock, Move::Paper]);

        let data = store.append(round(Move::Scissors, Move::Rock)).unwrap();
        assert_eq!(data.metadata.total_games, 4);
        assert_eq!(data.game_records.len(), 4);

        let reloaded = store.try_load().unwrap();
        assert_eq!(reloaded.game_records.len(), 4);
        assert_eq!(reloaded.unreadable_count(), 1);
        assert_eq!(reloaded.metadata.created_date, "t0");
        assert_eq!(store.player_moves(), vec![Move::Rock, Move::Paper, Move::Scissors]);
        assert!(fs::read_to_string(&path).unwrap().contains("lizard"));
    }

    #[test]
    fn test_append_sets_invalid_file_aside() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "{ not json").unwrap();
        let store = RecordStore::open(&path).unwrap();

        store.append(round(Move::Rock, Move::Paper)).unwrap();

        assert_eq!(store.try_load().unwrap().metadata.total_games, 1);
        let backups: Vec<PathBuf> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.to_string_lossy().contains("records.json.corrupt-"))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(&backups[0]).unwrap(), "{ not json");
    }

    #[test]
    fn test_append_recreates_deleted_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        let store = RecordStore::open(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let data = store.append(round(Move::Paper, Move::Paper)).unwrap();

        assert_eq!(data.metadata.total_games, 1);
        assert_eq!(data.metadata.draws, 1);
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "{ not json").unwrap();

        let store = RecordStore::open(&path).unwrap();

        assert!(matches!(store.try_load(), Err(ArenaError::Json { .. })));
        assert_eq!(store.load().metadata.total_games, 0);
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path().join("sub").join("records.json")).unwrap();
        fs::remove_dir_all(dir.path().join("sub")).unwrap();

        let err = store.append(round(Move::Rock, Move::Rock)).unwrap_err();
        assert!(matches!(err, ArenaError::Io { .. }));
    }
}
