//! Watch-history stores.
//!
//! A movie the user has watched is hidden from suggestions unless they
//! said they might watch it again. Two stores are provided: an in-memory
//! one for tests and short-lived sessions, and a JSON file store that
//! writes through on every change.

use crate::error::{CatalogError, Result};
use crate::types::MovieId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// One entry in the user's watch history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchedMovie {
    pub id: MovieId,
    /// Unix timestamp (seconds) of the most recent "watched" mark
    pub watched_at: i64,
    pub might_watch_again: bool,
}

/// Storage for watched movies.
///
/// `Send + Sync` so a store can sit behind shared ownership in a server.
pub trait WatchHistory: Send + Sync {
    fn get(&self, id: MovieId) -> Option<WatchedMovie>;

    fn all(&self) -> Vec<WatchedMovie>;

    /// Record that a movie was watched, replacing any earlier entry
    fn mark_watched(&mut self, id: MovieId, might_watch_again: bool) -> Result<()>;

    fn unmark_watched(&mut self, id: MovieId) -> Result<()>;

    /// Whether this movie should be left out of suggestions
    fn should_exclude(&self, id: MovieId) -> bool {
        self.get(id).is_some_and(|watched| !watched.might_watch_again)
    }
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

// =============================================================================
// In-memory store
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct InMemoryWatchHistory {
    entries: HashMap<MovieId, WatchedMovie>,
}

impl InMemoryWatchHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WatchHistory for InMemoryWatchHistory {
    fn get(&self, id: MovieId) -> Option<WatchedMovie> {
        self.entries.get(&id).copied()
    }

    fn all(&self) -> Vec<WatchedMovie> {
        let mut all: Vec<WatchedMovie> = self.entries.values().copied().collect();
        all.sort_by_key(|w| w.id);
        all
    }

    fn mark_watched(&mut self, id: MovieId, might_watch_again: bool) -> Result<()> {
        self.entries.insert(
            id,
            WatchedMovie {
                id,
                watched_at: now(),
                might_watch_again,
            },
        );
        Ok(())
    }

    fn unmark_watched(&mut self, id: MovieId) -> Result<()> {
        self.entries.remove(&id);
        Ok(())
    }
}

// =============================================================================
// JSON file store
// =============================================================================

/// File-backed history. The file holds a JSON array of [`WatchedMovie`].
#[derive(Debug)]
pub struct JsonWatchHistory {
    path: PathBuf,
    inner: InMemoryWatchHistory,
}

impl JsonWatchHistory {
    /// Open a history file; a missing file starts an empty history
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut inner = InMemoryWatchHistory::new();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let entries: Vec<WatchedMovie> =
                serde_json::from_str(&content).map_err(|e| CatalogError::ParseError {
                    file: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            for entry in entries {
                inner.entries.insert(entry.id, entry);
            }
            debug!("Loaded {} watched movies from {}", inner.entries.len(), path.display());
        }

        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.inner.all()).map_err(|e| CatalogError::SaveError {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl WatchHistory for JsonWatchHistory {
    fn get(&self, id: MovieId) -> Option<WatchedMovie> {
        self.inner.get(id)
    }

    fn all(&self) -> Vec<WatchedMovie> {
        self.inner.all()
    }

    fn mark_watched(&mut self, id: MovieId, might_watch_again: bool) -> Result<()> {
        self.inner.mark_watched(id, might_watch_again)?;
        self.save()
    }

    fn unmark_watched(&mut self, id: MovieId) -> Result<()> {
        self.inner.unmark_watched(id)?;
        self.save()
    }
}
