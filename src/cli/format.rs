//! Output formatting for terminal display.

use std::io::{self, Write};

use crate::model::Notification;
use crate::watch::{Batch, Mode, Presenter};

/// Prints batches to stdout, one notification per line pair.
#[derive(Debug, Default)]
pub(super) struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn present(&self, batch: &Batch<'_>) {
        if let Err(e) = write_batch(&mut io::stdout().lock(), batch) {
            tracing::warn!(repo = %batch.target, error = %e, "failed to write notifications");
        }
    }
}

fn write_batch(out: &mut impl Write, batch: &Batch<'_>) -> io::Result<()> {
    if let Some(header) = format_header(batch) {
        writeln!(out, "{header}")?;
    }
    for notification in batch.notifications {
        writeln!(out, "{}", format_notification(notification))?;
    }
    out.flush()
}

/// Watch batches arrive unprompted, so each one names its repository.
/// A listing is already introduced by the command itself.
pub(super) fn format_header(batch: &Batch<'_>) -> Option<String> {
    match batch.mode {
        Mode::Latest => None,
        Mode::Watch => Some(format!(
            "New activity on {} ({})",
            batch.target,
            plural(batch.notifications.len(), "event")
        )),
    }
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// `2024-03-01 12:00  @octocat pushed 1 commit to acme/widgets` followed by
/// the indented link.
pub(super) fn format_notification(notification: &Notification) -> String {
    format!(
        "{}  {}\n    {}",
        notification.occurred_at.strftime("%Y-%m-%d %H:%M"),
        notification.message,
        notification.link
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::target::Target;

    fn target() -> Target {
        Target {
            user: "acme".into(),
            repo: "widgets".into(),
        }
    }

    fn sample() -> Notification {
        Notification {
            message: "@octocat pushed 1 commit to acme/widgets".into(),
            link: "https://github.com/acme/widgets/commit/abc123".into(),
            occurred_at: "2024-03-01T12:05:59Z".parse().unwrap(),
        }
    }

    #[test]
    fn watch_batches_get_a_header() {
        let target = target();
        let notifications = [sample(), sample()];
        let batch = Batch {
            target: &target,
            mode: Mode::Watch,
            notifications: &notifications,
        };
        assert_eq!(
            format_header(&batch).as_deref(),
            Some("New activity on acme/widgets (2 events)")
        );

        let single = Batch {
            notifications: &notifications[..1],
            ..batch
        };
        assert_eq!(
            format_header(&single).as_deref(),
            Some("New activity on acme/widgets (1 event)")
        );
    }

    #[test]
    fn listings_have_no_header() {
        let target = target();
        let notifications = [sample()];
        let batch = Batch {
            target: &target,
            mode: Mode::Latest,
            notifications: &notifications,
        };
        assert_eq!(format_header(&batch), None);

        let mut out = Vec::new();
        write_batch(&mut out, &batch).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "2024-03-01 12:05  @octocat pushed 1 commit to acme/widgets\n    \
             https://github.com/acme/widgets/commit/abc123\n"
        );
    }

    #[test]
    fn watch_batch_is_written_header_first() {
        let target = target();
        let notifications = [sample()];
        let batch = Batch {
            target: &target,
            mode: Mode::Watch,
            notifications: &notifications,
        };

        let mut out = Vec::new();
        write_batch(&mut out, &batch).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("New activity on acme/widgets (1 event)\n2024-03-01 12:05  "));
    }

    #[test]
    fn formats_time_message_and_link() {
        let notification = sample();
        assert_eq!(
            format_notification(&notification),
            "2024-03-01 12:05  @octocat pushed 1 commit to acme/widgets\n    \
             https://github.com/acme/widgets/commit/abc123"
        );
    }
}
