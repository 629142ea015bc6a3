//! Local persistence for watermarks.
//!
//! One TOML file holds the last surfaced timestamp for every watched
//! repository, keyed by user and then repository:
//!
//! ```text
//! [users.acme.repos.widgets]
//! watched = "2024-03-01T12:00:00Z"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{fs, io};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid watermark file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to encode watermarks: {0}")]
    Encode(#[from] toml::ser::Error),
}

pub type Result<T> = core::result::Result<T, StoreError>;

/// Durable home of the per-(user, repository) watermark.
pub trait WatermarkStore {
    /// The persisted watermark, or `None` if this pair was never watched.
    fn load(&self, user: &str, repo: &str) -> Result<Option<Timestamp>>;

    /// Persist a watermark. Last write wins.
    fn save(&self, user: &str, repo: &str, watched: Timestamp) -> Result<()>;
}

/// On-disk shape: `{ user -> { repository -> watermark } }`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct WatermarkFile {
    #[serde(default)]
    users: BTreeMap<String, UserWatermarks>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct UserWatermarks {
    #[serde(default)]
    repos: BTreeMap<String, RepoWatermark>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RepoWatermark {
    watched: Timestamp,
}

/// File-backed watermark store.
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Creates a store backed by the given file. Nothing is touched until
    /// the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the default file: `~/.repowatch/watermarks.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".repowatch").join("watermarks.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is a valid empty store.
    fn read(&self) -> Result<WatermarkFile> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(WatermarkFile::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, file: &WatermarkFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string_pretty(file)?)?;
        Ok(())
    }
}

impl WatermarkStore for Storage {
    fn load(&self, user: &str, repo: &str) -> Result<Option<Timestamp>> {
        let file = self.read()?;
        Ok(file
            .users
            .get(user)
            .and_then(|u| u.repos.get(repo))
            .map(|r| r.watched))
    }

    fn save(&self, user: &str, repo: &str, watched: Timestamp) -> Result<()> {
        let mut file = self.read()?;
        file.users
            .entry(user.to_string())
            .or_default()
            .repos
            .insert(repo.to_string(), RepoWatermark { watched });
        self.write(&file)
    }
}
