//! Durable high score.
//!
//! The store is a flat JSON object of integer values; the high score lives
//! under [`HIGH_SCORE_KEY`]. An absent file or key reads as 0.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Error, Result};

pub const HIGH_SCORE_KEY: &str = "feat_highscore";

pub trait HighScoreStore {
    /// Stored high score, 0 when unset.
    fn high_score(&self) -> u32;
    fn set_high_score(&mut self, score: u32) -> Result<()>;
    fn clear_high_score(&mut self) -> Result<()>;
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, u64>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(Error::io(&self.path, e)),
        };
        serde_json::from_str(&text).map_err(|e| Error::json(&self.path, e))
    }

    fn write(&self, map: &BTreeMap<String, u64>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(map).map_err(|e| Error::json(&tmp, e))?;
        fs::write(&tmp, data).map_err(|e| Error::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| Error::io(&self.path, e))
    }

    /// Current map, or an empty one when the file is unreadable. The bad
    /// file is overwritten by the next write.
    fn read_or_empty(&self) -> BTreeMap<String, u64> {
        self.read().unwrap_or_else(|e| {
            warn!(error = %e, "high score store unreadable, treating as empty");
            BTreeMap::new()
        })
    }
}

impl HighScoreStore for JsonFileStore {
    fn high_score(&self) -> u32 {
        self.read_or_empty()
            .get(HIGH_SCORE_KEY)
            .map(|&v| u32::try_from(v).unwrap_or(u32::MAX))
            .unwrap_or(0)
    }

    fn set_high_score(&mut self, score: u32) -> Result<()> {
        let mut map = self.read_or_empty();
        map.insert(HIGH_SCORE_KEY.to_string(), u64::from(score));
        self.write(&map)
    }

    fn clear_high_score(&mut self) -> Result<()> {
        let mut map = self.read_or_empty();
        if map.remove(HIGH_SCORE_KEY).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.write(&map)
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Option<u32>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> Option<u32> {
        self.value
    }
}

#[cfg(test)]
impl HighScoreStore for MemoryStore {
    fn high_score(&self) -> u32 {
        self.value.unwrap_or(0)
    }

    fn set_high_score(&mut self, score: u32) -> Result<()> {
        self.value = Some(score);
        Ok(())
    }

    fn clear_high_score(&mut self) -> Result<()> {
        self.value = None;
        Ok(())
    }
}
