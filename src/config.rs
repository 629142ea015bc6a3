//! repowatch configuration.
//!
//! Loaded from `~/.repowatch/config.toml`. A missing file means defaults.

use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::{Deserialize, Serialize};

/// repowatch configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// User to watch when `--user` is not given and no git remote applies.
    pub default_user: Option<String>,

    /// Shell command run for every emitted notification.
    pub hook: Option<String>,

    /// `GH_CONFIG_DIR` to use when calling `gh`, for a non-default login.
    pub gh_config_dir: Option<PathBuf>,
}

impl Config {
    /// Load config from `~/.repowatch/config.toml`.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file. Missing file → defaults.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        let mut config: Self = toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        config.default_user = config.default_user.filter(|s| !s.is_empty());
        config.hook = config.hook.filter(|s| !s.trim().is_empty());
        Ok(config)
    }

    /// The config file path: `~/.repowatch/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".repowatch").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.default_user.is_none());
        assert!(config.hook.is_none());
    }

    #[test]
    fn reads_kebab_case_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "default-user = \"acme\"\nhook = \"notify-send \\\"$REPOWATCH_MESSAGE\\\"\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_user.as_deref(), Some("acme"));
        assert_eq!(
            config.hook.as_deref(),
            Some("notify-send \"$REPOWATCH_MESSAGE\"")
        );
    }

    #[test]
    fn empty_values_are_unset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default-user = \"\"\nhook = \"  \"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.default_user.is_none());
        assert!(config.hook.is_none());
    }

    #[test]
    fn unknown_key_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "defualt-user = \"acme\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.contains("invalid config"));
    }
}
