//! Watermark tracking: the newest timestamp already surfaced.

use jiff::Timestamp;

use crate::storage::{self, WatermarkStore};

/// Seed used when a (user, repository) pair has never been watched.
pub const DEFAULT_WATERMARK: &str = "2008-04-01T00:00:00Z";

/// Parsed [`DEFAULT_WATERMARK`].
pub fn default_watermark() -> Timestamp {
    DEFAULT_WATERMARK
        .parse()
        .unwrap_or(Timestamp::UNIX_EPOCH)
}

/// Monotonic watermark for one (user, repository) pair.
///
/// Only moves forward. Every advance is written through to the store.
pub struct WatermarkTracker<'a> {
    store: &'a dyn WatermarkStore,
    user: String,
    repo: String,
    current: Timestamp,
}

impl<'a> WatermarkTracker<'a> {
    /// Seed from the store, or [`DEFAULT_WATERMARK`] if nothing is persisted.
    pub fn load(store: &'a dyn WatermarkStore, user: &str, repo: &str) -> storage::Result<Self> {
        let current = store.load(user, repo)?.unwrap_or_else(default_watermark);
        Ok(Self {
            store,
            user: user.to_string(),
            repo: repo.to_string(),
            current,
        })
    }

    pub fn current(&self) -> Timestamp {
        self.current
    }

    /// Move the watermark to `candidate` if it is newer. Returns whether it moved.
    ///
    /// A failed save is logged; the in-memory value still advances so the
    /// running process doesn't repeat itself.
    pub fn advance(&mut self, candidate: Timestamp) -> bool {
        if candidate <= self.current {
            return false;
        }
        self.current = candidate;

        if let Err(e) = self.store.save(&self.user, &self.repo, candidate) {
            tracing::warn!(
                user = %self.user,
                repo = %self.repo,
                error = %e,
                "failed to persist watermark"
            );
        } else {
            tracing::debug!(
                user = %self.user,
                repo = %self.repo,
                watched = %candidate,
                "watermark advanced"
            );
        }
        true
    }
}
