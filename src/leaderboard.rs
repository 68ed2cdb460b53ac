//! Persistent high-score table.
//!
//! Entries are kept sorted by score, highest first.  Ties keep submission
//! order and duplicate names are allowed.  The whole ordered list is
//! written back as JSON on every save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::constants::MAX_NAME_LEN;
use crate::entities::Difficulty;

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("player name must not be blank")]
    EmptyName,

    #[error("failed to access leaderboard file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("leaderboard file '{path}' is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode leaderboard: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub difficulty: Difficulty,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a board from disk.  A missing file is an empty board.
    pub fn load(path: &Path) -> Result<Self, LeaderboardError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no leaderboard yet, starting empty");
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(LeaderboardError::Io { path: path.display().to_string(), source })
            }
        };

        let mut board: Leaderboard =
            serde_json::from_str(&raw).map_err(|source| LeaderboardError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        // Hand-edited files may be out of order.
        board.sort();
        Ok(board)
    }

    /// Like [`Leaderboard::load`], but a file that is not a valid board is
    /// moved to [`corrupt_path`] and an empty board is returned, so a later
    /// save never overwrites the old scores.  I/O failures are returned.
    pub fn open(path: &Path) -> Result<Self, LeaderboardError> {
        match Self::load(path) {
            Err(LeaderboardError::Parse { source, .. }) => {
                let moved_to = corrupt_path(path);
                fs::rename(path, &moved_to).map_err(|source| LeaderboardError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                warn!(
                    path = %path.display(),
                    moved_to = %moved_to.display(),
                    "leaderboard unreadable ({source}), starting empty"
                );
                Ok(Self::new())
            }
            other => other,
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), LeaderboardError> {
        let io_err = |source: io::Error| LeaderboardError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(LeaderboardError::Encode)?;
        fs::write(path, json).map_err(io_err)?;
        info!(path = %path.display(), entries = self.entries.len(), "leaderboard saved");
        Ok(())
    }

    /// Record a finished run stamped with the current time.
    pub fn submit(
        &mut self,
        name: &str,
        score: u32,
        difficulty: Difficulty,
    ) -> Result<&LeaderboardEntry, LeaderboardError> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_else(|err| {
                warn!("system clock before Unix epoch: {err}");
                0
            });
        self.submit_at(name, score, difficulty, timestamp)
    }

    /// Record a run with an explicit timestamp.  Names that are blank after
    /// trimming are rejected; longer names are cut to 20 characters.
    pub fn submit_at(
        &mut self,
        name: &str,
        score: u32,
        difficulty: Difficulty,
        timestamp: u64,
    ) -> Result<&LeaderboardEntry, LeaderboardError> {
        if name.trim().is_empty() {
            return Err(LeaderboardError::EmptyName);
        }
        let name: String = name.chars().take(MAX_NAME_LEN).collect();

        // Insert after every entry scoring at least as much, so ties keep
        // submission order.
        let index = self.entries.partition_point(|e| e.score >= score);
        self.entries.insert(index, LeaderboardEntry { name, score, difficulty, timestamp });
        Ok(&self.entries[index])
    }

    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn all(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sort(&mut self) {
        // Stable: equal scores stay in file order.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
    }
}

/// Where [`Leaderboard::open`] keeps a board file it could not parse.
pub fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}
