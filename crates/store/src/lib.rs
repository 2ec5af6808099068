//! Score persistence: best score plus the most recent results, stored as a
//! small JSON file next to the executable's working directory.
//!
//! Load and save surface their errors; deciding whether a missing or corrupt
//! file is fatal is the caller's call (the game treats it as a fresh start).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Default score file name, relative to the working directory.
pub const SCORE_FILE: &str = "gridfall_scores.json";

/// How many recent results are retained.
pub const LAST_SCORES_KEPT: usize = 3;

/// One finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    /// Local timestamp, `YYYY-MM-DD HH:MM`.
    pub date: String,
}

/// The persisted score state. Missing fields deserialize to their defaults
/// so older or hand-edited files still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(default)]
    pub best_score: u32,
    #[serde(default)]
    pub last_scores: Vec<ScoreEntry>,
}

impl ScoreRecord {
    /// Fold one finished game into the record: raise the best score if
    /// beaten and append to the recent list, keeping only the newest
    /// `LAST_SCORES_KEPT` entries (oldest first).
    pub fn record(&mut self, score: u32, date: String) {
        self.best_score = self.best_score.max(score);
        self.last_scores.push(ScoreEntry { score, date });
        if self.last_scores.len() > LAST_SCORES_KEPT {
            let excess = self.last_scores.len() - LAST_SCORES_KEPT;
            self.last_scores.drain(..excess);
        }
    }
}

/// Current local time formatted for `ScoreEntry::date`.
pub fn now_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M").to_string()
}

/// JSON-file-backed score store.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location.
    pub fn default_path() -> Self {
        Self::new(SCORE_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the score file.
    pub fn load(&self) -> Result<ScoreRecord> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading score file {}", self.path.display()))?;
        let record = serde_json::from_str(&raw)
            .with_context(|| format!("parsing score file {}", self.path.display()))?;
        Ok(record)
    }

    /// Serialize and write the record, replacing any previous contents.
    pub fn save(&self, record: &ScoreRecord) -> Result<()> {
        let raw = serde_json::to_string_pretty(record).context("serializing scores")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("writing score file {}", self.path.display()))?;
        Ok(())
    }
}
