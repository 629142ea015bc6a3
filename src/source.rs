//! Activity sources: where activity records come from.
//!
//! The poll cycle only needs a newest-first list of records for a
//! (user, repository) pair. The production source shells out to `gh`.

mod github;

use std::io;

pub use github::GhCli;

use crate::model::ActivityRecord;

/// Errors from fetching a repository's activity feed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to run gh: {0}")]
    Spawn(#[from] io::Error),

    #[error("gh exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("invalid activity JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A feed of repository activity, newest first.
pub trait ActivitySource {
    fn fetch(&self, user: &str, repo: &str) -> Result<Vec<ActivityRecord>, FetchError>;
}
