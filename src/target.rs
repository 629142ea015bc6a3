//! Target resolution: which (user, repository) pair to watch.
//!
//! Rather than requiring `--user` and `--repo` on every invocation, each
//! half is resolved through a chain:
//!
//! - repository: `--repo`, then the git remote's repository name.
//! - user: `--user`, then `REPOWATCH_USER`, then the git remote's owner,
//!   then `default-user` in `~/.repowatch/config.toml`.
//!
//! The git remote is `origin` unless `--remote` names another one.

use std::fmt;
use std::process::Command;

use crate::config::Config;

/// Error shown when no repository can be determined.
pub const REPO_REQUIRED: &str = "You must specify a Git repository to run this command \
    (pass --repo, or run inside a clone with a GitHub remote)";

/// Error shown when no user can be determined.
pub const USER_REQUIRED: &str = "user required: pass --user, set REPOWATCH_USER, \
    or add `default-user = \"...\"` to ~/.repowatch/config.toml";

/// The (user, repository) pair being watched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub user: String,
    pub repo: String,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user, self.repo)
    }
}

/// Owner and name parsed from a git remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepo {
    pub owner: String,
    pub name: String,
}

/// Values given on the command line or in the environment.
#[derive(Debug, Default)]
pub struct Explicit<'a> {
    pub user: Option<&'a str>,
    pub repo: Option<&'a str>,
    pub env_user: Option<&'a str>,
}

/// Resolve the target from explicit values, the git remote, and config.
pub fn resolve_target(
    explicit: &Explicit<'_>,
    remote: Option<&RemoteRepo>,
    config: &Config,
) -> Result<Target, String> {
    let repo = explicit
        .repo
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .or_else(|| remote.map(|r| r.name.clone()))
        .ok_or(REPO_REQUIRED)?;

    let user = explicit
        .user
        .or(explicit.env_user)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .or_else(|| remote.map(|r| r.owner.clone()))
        .or_else(|| config.default_user.clone())
        .ok_or(USER_REQUIRED)?;

    Ok(Target { user, repo })
}

/// Look up a git remote in the current directory and parse it.
///
/// Returns `None` outside a repository, for unknown remotes, and for URLs
/// that don't look like `owner/name` on a forge.
pub fn git_remote(name: &str) -> Option<RemoteRepo> {
    let output = Command::new("git")
        .args(["remote", "get-url", name])
        .output()
        .ok()?;

    if !output.status.success() {
        tracing::debug!(remote = name, "git remote not found");
        return None;
    }

    parse_remote_url(String::from_utf8_lossy(&output.stdout).trim())
}

/// Parse `https://host/owner/name(.git)`, `ssh://git@host/owner/name(.git)`,
/// or scp-style `git@host:owner/name(.git)`.
pub fn parse_remote_url(url: &str) -> Option<RemoteRepo> {
    let path = if let Some((_, rest)) = url.split_once("://") {
        // Drop the host (and any user@ prefix).
        rest.split_once('/')?.1
    } else {
        // scp-style: everything after the first ':'.
        url.split_once(':')?.1
    };

    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    let (owner, name) = path.rsplit_once('/')?;
    let owner = owner.rsplit('/').next().unwrap_or(owner);

    if owner.is_empty() || name.is_empty() {
        return None;
    }

    Some(RemoteRepo {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote() -> RemoteRepo {
        RemoteRepo {
            owner: "acme".into(),
            name: "widgets".into(),
        }
    }

    fn config(user: Option<&str>) -> Config {
        Config {
            default_user: user.map(String::from),
            ..Config::default()
        }
    }

    #[test]
    fn explicit_wins() {
        let explicit = Explicit {
            user: Some("octocat"),
            repo: Some("hello-world"),
            env_user: Some("hubot"),
        };
        let target = resolve_target(&explicit, Some(&remote()), &config(Some("cfg"))).unwrap();
        assert_eq!(
            target,
            Target {
                user: "octocat".into(),
                repo: "hello-world".into(),
            }
        );
    }

    #[test]
    fn env_user_beats_remote_owner() {
        let explicit = Explicit {
            env_user: Some("hubot"),
            ..Explicit::default()
        };
        let target = resolve_target(&explicit, Some(&remote()), &config(None)).unwrap();
        assert_eq!(target.user, "hubot");
        assert_eq!(target.repo, "widgets");
    }

    #[test]
    fn remote_fills_both_halves() {
        let target =
            resolve_target(&Explicit::default(), Some(&remote()), &config(Some("cfg"))).unwrap();
        assert_eq!(target.to_string(), "acme/widgets");
    }

    #[test]
    fn config_user_is_last_resort() {
        let explicit = Explicit {
            repo: Some("widgets"),
            ..Explicit::default()
        };
        let target = resolve_target(&explicit, None, &config(Some("cfg"))).unwrap();
        assert_eq!(target.user, "cfg");
    }

    #[test]
    fn missing_repo_is_a_configuration_error() {
        let explicit = Explicit {
            user: Some("octocat"),
            ..Explicit::default()
        };
        let err = resolve_target(&explicit, None, &config(None)).unwrap_err();
        assert_eq!(err, REPO_REQUIRED);
    }

    #[test]
    fn missing_user_is_an_error() {
        let explicit = Explicit {
            repo: Some("widgets"),
            ..Explicit::default()
        };
        let err = resolve_target(&explicit, None, &config(None)).unwrap_err();
        assert_eq!(err, USER_REQUIRED);
    }

    #[test]
    fn parses_remote_url_forms() {
        for url in [
            "https://github.com/acme/widgets.git",
            "https://github.com/acme/widgets",
            "https://github.com/acme/widgets/",
            "git@github.com:acme/widgets.git",
            "ssh://git@github.com/acme/widgets.git",
            "ssh://git@github.com:22/acme/widgets",
        ] {
            assert_eq!(parse_remote_url(url), Some(remote()), "{url}");
        }
    }

    #[test]
    fn rejects_unparseable_remotes() {
        for url in ["", "/srv/git/widgets", "https://github.com/widgets", "git@github.com:"] {
            assert_eq!(parse_remote_url(url), None, "{url}");
        }
    }
}
