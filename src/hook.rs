//! Notification hooks: run a user command for every emitted notification.
//!
//! The notification is written to the hook's stdin before `notify`
//! returns, so the hook still gets it if repowatch exits right away.
//! Beyond that the poll cycle never waits on hooks, and a failing hook
//! only produces a warning.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

use crate::model::Notification;

/// Receives each emitted notification for side effects.
pub trait HookSink {
    fn notify(&self, notification: &Notification, user: &str, repo: &str);
}

/// Runs a shell command per notification.
///
/// The command gets the notification as JSON on stdin, plus
/// `REPOWATCH_USER`, `REPOWATCH_REPO`, `REPOWATCH_MESSAGE` and
/// `REPOWATCH_LINK` in its environment.
#[derive(Debug, Clone)]
pub struct CommandHook {
    command: String,
}

impl CommandHook {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Spawn the hook, hand it the notification, and return the thread
    /// that reaps it.
    fn dispatch(
        &self,
        notification: &Notification,
        user: &str,
        repo: &str,
    ) -> io::Result<JoinHandle<()>> {
        let body = serde_json::to_vec(notification).map_err(io::Error::other)?;

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .env("REPOWATCH_USER", user)
            .env("REPOWATCH_REPO", repo)
            .env("REPOWATCH_MESSAGE", &notification.message)
            .env("REPOWATCH_LINK", &notification.link)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()?;

        // Fits in the pipe buffer, so this doesn't wait on the hook. Dropping
        // the handle closes the pipe.
        if let Some(mut stdin) = child.stdin.take()
            && let Err(e) = stdin.write_all(&body)
        {
            // A hook that ignores stdin may close the pipe first.
            tracing::debug!(command = %self.command, error = %e, "hook did not read stdin");
        }

        let command = self.command.clone();
        Ok(thread::spawn(move || match child.wait() {
            Ok(status) if status.success() => {}
            Ok(status) => tracing::warn!(%command, %status, "notification hook failed"),
            Err(e) => tracing::warn!(%command, error = %e, "notification hook failed"),
        }))
    }
}

impl HookSink for CommandHook {
    fn notify(&self, notification: &Notification, user: &str, repo: &str) {
        if let Err(e) = self.dispatch(notification, user, repo) {
            tracing::warn!(
                command = %self.command,
                error = %e,
                "failed to start notification hook"
            );
        }
    }
}
