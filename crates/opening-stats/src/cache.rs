//! Memoization of finished reports, keyed by who asked and what was analysed.
//!
//! The cache is an owned value handed around by the caller. A key includes a
//! digest of the filtered game set, so a new game or a different filter
//! produces a different key rather than a stale hit.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::error::ReportError;
use crate::game::Game;
use crate::report::OpeningReport;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportKey {
    pub username: String,
    pub platform: String,
    pub rating: Option<u32>,
    pub games_digest: u64,
}

impl ReportKey {
    pub fn new(username: &str, platform: &str, rating: Option<u32>, games: &[Game]) -> Self {
        Self {
            username: username.to_lowercase(),
            platform: platform.to_lowercase(),
            rating,
            games_digest: games_digest(games),
        }
    }
}

/// Content hash of a game set, order-sensitive. Stable within a process.
pub fn games_digest(games: &[Game]) -> u64 {
    let mut hasher = DefaultHasher::new();
    games.len().hash(&mut hasher);
    for game in games {
        game.hash(&mut hasher);
    }
    hasher.finish()
}

#[derive(Default)]
pub struct ReportCache {
    entries: RwLock<HashMap<ReportKey, Arc<OpeningReport>>>,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ReportKey) -> Option<Arc<OpeningReport>> {
        self.entries.read().ok()?.get(key).cloned()
    }

    pub fn insert(&self, key: ReportKey, report: OpeningReport) -> Arc<OpeningReport> {
        let report = Arc::new(report);
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key, Arc::clone(&report));
        }
        report
    }

    /// Cached report for `key`, building and storing it on a miss.
    /// A failed build is not cached.
    pub fn get_or_build<F>(&self, key: ReportKey, build: F) -> Result<Arc<OpeningReport>, ReportError>
    where
        F: FnOnce() -> Result<OpeningReport, ReportError>,
    {
        if let Some(report) = self.get(&key) {
            debug!(username = %key.username, "Report cache hit");
            return Ok(report);
        }

        let report = build()?;
        Ok(self.insert(key, report))
    }

    /// Drop every cached report for `username`.
    pub fn invalidate_user(&self, username: &str) {
        let username = username.to_lowercase();
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|key, _| key.username != username);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
