//! High score persistence
//!
//! The simulation only knows the best score as a number. Storage sits behind
//! [`HighScoreStore`] so hosts can keep it in a file, browser storage or memory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::PersistenceError;
use crate::sim::GameOverSummary;

/// Persisted best run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,
    /// Wave reached on the record run
    pub wave: u32,
    #[serde(default)]
    pub efficiency: u32,
}

/// Storage collaborator for the best score
pub trait HighScoreStore {
    /// Stored record, or `None` if nothing was saved yet
    fn load(&self) -> Option<HighScoreRecord>;
    fn save(&mut self, record: &HighScoreRecord) -> Result<(), PersistenceError>;
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Default file name, relative to the working directory
    pub const DEFAULT_FILE: &'static str = "nexus_bird_highscore.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<HighScoreRecord, PersistenceError> {
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Option<HighScoreRecord> {
        if !self.path.exists() {
            log::info!("No high score at {}, starting fresh", self.path.display());
            return None;
        }
        match self.read() {
            Ok(record) => {
                log::info!("Loaded high score {}", record.high_score);
                Some(record)
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high score file {}: {e}", self.path.display());
                None
            }
        }
    }

    fn save(&mut self, record: &HighScoreRecord) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(record)?;
        // Write-then-rename so a crash never leaves a truncated file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("High score {} saved", record.high_score);
        Ok(())
    }
}

/// In-memory store for tests and embedders without storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub record: Option<HighScoreRecord>,
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Option<HighScoreRecord> {
        self.record.clone()
    }

    fn save(&mut self, record: &HighScoreRecord) -> Result<(), PersistenceError> {
        self.record = Some(record.clone());
        Ok(())
    }
}

/// Keeps the persisted best score monotonic across runs
#[derive(Debug)]
pub struct HighScoreTracker<S: HighScoreStore> {
    store: S,
    best: HighScoreRecord,
}

impl<S: HighScoreStore> HighScoreTracker<S> {
    pub fn new(store: S) -> Self {
        let best = store.load().unwrap_or_default();
        Self { store, best }
    }

    /// Best score seen so far
    pub fn best(&self) -> u32 {
        self.best.high_score
    }

    pub fn record(&self) -> &HighScoreRecord {
        &self.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Offer a finished run. Only a strictly higher score is written.
    /// Returns true if the record was beaten and saved.
    pub fn submit(&mut self, summary: &GameOverSummary) -> Result<bool, PersistenceError> {
        if summary.score <= self.best.high_score {
            return Ok(false);
        }
        let record = HighScoreRecord {
            high_score: summary.score,
            wave: summary.level,
            efficiency: summary.efficiency,
        };
        self.store.save(&record)?;
        self.best = record;
        Ok(true)
    }
}
