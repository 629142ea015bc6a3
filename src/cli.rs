//! CLI interface for repowatch.
//!
//! `repowatch --latest` lists recent activity once. `repowatch --watch`
//! keeps polling every three minutes and only prints what is new. Both
//! flags may be given together: the listing runs first, then the watch.

mod format;

use std::env;

use clap::Parser;

use crate::config::Config;
use crate::hook::{CommandHook, HookSink};
use crate::source::GhCli;
use crate::storage::Storage;
use crate::target::{Explicit, Target, git_remote, resolve_target};
use crate::watch::schedule::{self, WATCH_PERIOD};
use crate::watch::{CycleOutcome, Watcher};

use format::TerminalPresenter;

/// repowatch — follow a repository's activity from the terminal.
#[derive(Debug, Parser)]
#[command(name = "repowatch", after_long_help = USAGE_HELP)]
pub struct Cli {
    /// List the latest activity once. Implied when `--watch` is not given.
    #[arg(short, long)]
    latest: bool,

    /// Keep polling and print only activity that hasn't been shown yet.
    #[arg(short, long)]
    watch: bool,

    /// Repository owner. Defaults to the git remote's owner.
    #[arg(short, long)]
    user: Option<String>,

    /// Repository name. Defaults to the git remote's repository.
    #[arg(short, long)]
    repo: Option<String>,

    /// Git remote used to infer `--user` and `--repo`.
    #[arg(long, default_value = "origin")]
    remote: String,
}

/// Which cycles a run performs, in order: listing first, then watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Plan {
    list: bool,
    watch: bool,
}

impl Cli {
    /// `--latest` is implied when `--watch` isn't given.
    fn plan(&self) -> Plan {
        Plan {
            list: self.latest || !self.watch,
            watch: self.watch,
        }
    }
}

impl Plan {
    /// A failed listing is fatal only when no watch follows it.
    fn check_listing(self, outcome: CycleOutcome, target: &Target) -> Result<(), String> {
        if outcome == CycleOutcome::FetchFailed && !self.watch {
            return Err(format!("could not list activity for {target}"));
        }
        Ok(())
    }
}

const USAGE_HELP: &str = r#"Examples:
  repowatch --user acme --repo widgets
  repowatch -w                      # inside a clone: watch origin
  repowatch -l -w --remote upstream

Hook:
  Set `hook = "..."` in ~/.repowatch/config.toml to run a command for every
  notification. It receives the notification as JSON on stdin and
  REPOWATCH_USER, REPOWATCH_REPO, REPOWATCH_MESSAGE, REPOWATCH_LINK."#;

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config) -> Result<(), String> {
    let cli = Cli::parse();

    let remote = if cli.user.is_none() || cli.repo.is_none() {
        git_remote(&cli.remote)
    } else {
        None
    };
    let env_user = env::var("REPOWATCH_USER").ok();
    let target = resolve_target(
        &Explicit {
            user: cli.user.as_deref(),
            repo: cli.repo.as_deref(),
            env_user: env_user.as_deref(),
        },
        remote.as_ref(),
        config,
    )?;

    let storage = Storage::new(
        Storage::default_path().ok_or("could not determine home directory")?,
    );
    let source = GhCli::new(config.gh_config_dir.clone());
    let presenter = TerminalPresenter;
    let hook = config.hook.as_deref().map(CommandHook::new);

    let mut watcher = Watcher::new(
        target,
        &source,
        &storage,
        &presenter,
        hook.as_ref().map(|h| h as &dyn HookSink),
    )
    .map_err(|e| format!("failed to read {}: {e}", storage.path().display()))?;

    tracing::debug!(
        repo = %watcher.target(),
        watermark = %watcher.watermark(),
        "watcher ready"
    );

    let plan = cli.plan();

    if plan.list {
        eprintln!("Listing activities on {}", watcher.target());
        let outcome = schedule::run_once(&mut watcher);
        plan.check_listing(outcome, watcher.target())?;
    }

    if plan.watch {
        eprintln!("Watching any activity on {}", watcher.target());
        schedule::run_watch(&mut watcher, WATCH_PERIOD, schedule::sleep);
    }

    Ok(())
}
