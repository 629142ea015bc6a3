//! Notification: what gets shown for one activity record.

use jiff::Timestamp;
use serde::Serialize;

use super::ActivityRecord;

/// A rendered activity record, ready for display or a hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// `@<actor> <fragment> <repository>`.
    pub message: String,
    pub link: String,
    pub occurred_at: Timestamp,
}

impl Notification {
    /// Build a notification from a record and its classified fragment.
    pub fn new(record: &ActivityRecord, fragment: &str, link: String) -> Self {
        Self {
            message: format!(
                "@{} {fragment} {}",
                record.actor.login, record.repository.name
            ),
            link,
            occurred_at: record.occurred_at,
        }
    }
}
