//! GitHub activity via the `gh` CLI.
//!
//! Uses `gh api` so authentication, enterprise hosts, and tokens are
//! whatever the user already configured for `gh`.

use std::path::PathBuf;
use std::process::Command;

use serde_json::Value;

use crate::model::ActivityRecord;

use super::{ActivitySource, FetchError};

/// Fetches repository events through `gh api`.
#[derive(Debug, Default)]
pub struct GhCli {
    /// Optional `GH_CONFIG_DIR` override for a non-default `gh` login.
    config_dir: Option<PathBuf>,
}

impl GhCli {
    pub fn new(config_dir: Option<PathBuf>) -> Self {
        Self { config_dir }
    }

    /// Run `gh` with the given args and return stdout.
    fn gh(&self, args: &[&str]) -> Result<String, FetchError> {
        let mut command = Command::new("gh");
        command.args(args);
        if let Some(dir) = &self.config_dir {
            command.env("GH_CONFIG_DIR", dir);
        }

        let output = command.output()?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(FetchError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl ActivitySource for GhCli {
    fn fetch(&self, user: &str, repo: &str) -> Result<Vec<ActivityRecord>, FetchError> {
        let endpoint = format!("repos/{user}/{repo}/events");
        let json = self.gh(&["api", &endpoint])?;
        Ok(decode_events(&json)?)
    }
}

/// Decode a `GET /repos/{owner}/{repo}/events` response.
///
/// The response must be a JSON array. Entries that don't decode are
/// skipped with a warning rather than failing the whole feed.
fn decode_events(json: &str) -> Result<Vec<ActivityRecord>, serde_json::Error> {
    let entries: Vec<Value> = serde_json::from_str(json)?;

    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<ActivityRecord>(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "skipping undecodable activity record");
                None
            }
        })
        .collect())
}
