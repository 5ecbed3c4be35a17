//! Durable best score
//!
//! The only state that outlives a game is one integer keyed `high_score`.
//! [`FileHighScoreStore`] keeps it in a small JSON document; the
//! [`HighScoreKeeper`] caches the value and only writes when it is beaten.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the best score lives between runs
pub trait HighScoreStore {
    /// Returns 0 when nothing has been stored yet
    fn load(&self) -> Result<u32>;
    fn save(&mut self, score: u32) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// JSON file backed store: `{"high_score": 120}`
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score from {:?}", self.path))?;
        let record: HighScoreRecord =
            serde_json::from_str(&json).context("Failed to deserialize high score")?;

        Ok(record.high_score)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })
            .context("Failed to serialize high score")?;

        // Write next to the target, then swap it in
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .with_context(|| format!("Failed to write high score to {:?}", tmp))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to move high score into {:?}", self.path))?;

        Ok(())
    }
}

/// In-memory store for tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    value: u32,
}

#[cfg(test)]
impl MemoryHighScoreStore {
    pub fn new(value: u32) -> Self {
        Self { value }
    }
}

#[cfg(test)]
impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> Result<u32> {
        Ok(self.value)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.value = score;
        Ok(())
    }
}

/// Caches the best score and persists it when beaten
pub struct HighScoreKeeper<S: HighScoreStore> {
    store: S,
    best: u32,
}

impl<S: HighScoreStore> HighScoreKeeper<S> {
    /// Read the stored value; an unreadable store counts as 0
    pub fn open(store: S) -> Self {
        let best = match store.load() {
            Ok(best) => best,
            Err(error) => {
                tracing::warn!(?error, "failed to load high score, starting from 0");
                0
            }
        };

        Self { store, best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Offer a final score.
    ///
    /// Returns `Ok(true)` when it beat the previous best and was written. The
    /// in-memory best moves even when the write fails.
    pub fn submit(&mut self, score: u32) -> Result<bool> {
        if score <= self.best {
            return Ok(false);
        }

        self.best = score;
        self.store.save(score)?;
        Ok(true)
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }
}
