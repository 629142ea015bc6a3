//! The poll cycle: fetch, classify, filter, resolve, emit, advance.
//!
//! A [`Watcher`] is built once per (user, repository) target and owns the
//! only state that survives between cycles: the seen-set and the
//! watermark. Everything it talks to is a collaborator behind a trait.

mod dedup;
pub mod schedule;
mod watermark;

use dedup::SeenSet;
use watermark::WatermarkTracker;

use jiff::Timestamp;

use crate::classify::{Classification, classify};
use crate::hook::HookSink;
use crate::link::resolve_link;
use crate::model::Notification;
use crate::source::ActivitySource;
use crate::storage::{self, WatermarkStore};
use crate::target::Target;

/// How a cycle filters what it fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One-shot listing: show everything classifiable.
    Latest,

    /// Continuous watch: show only what is new since the watermark.
    Watch,
}

/// One cycle's output, oldest first, with the context it was produced in.
#[derive(Debug)]
pub struct Batch<'a> {
    pub target: &'a Target,
    pub mode: Mode,
    pub notifications: &'a [Notification],
}

/// Renders a batch of notifications.
pub trait Presenter {
    fn present(&self, batch: &Batch<'_>);
}

/// How a cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Fetch succeeded. `unrecognized` counts records whose event type
    /// isn't known and was skipped with a warning.
    Completed { emitted: usize, unrecognized: usize },

    /// The activity source failed; nothing changed.
    FetchFailed,
}

impl CycleOutcome {
    /// Notifications emitted, or `None` if the fetch failed.
    pub fn emitted(self) -> Option<usize> {
        match self {
            Self::Completed { emitted, .. } => Some(emitted),
            Self::FetchFailed => None,
        }
    }
}

/// Poll cycle orchestrator for a single target.
pub struct Watcher<'a> {
    target: Target,
    source: &'a dyn ActivitySource,
    presenter: &'a dyn Presenter,
    hook: Option<&'a dyn HookSink>,
    seen: SeenSet,
    watermark: WatermarkTracker<'a>,
}

impl<'a> Watcher<'a> {
    /// Build a watcher, seeding its watermark from `store`.
    pub fn new(
        target: Target,
        source: &'a dyn ActivitySource,
        store: &'a dyn WatermarkStore,
        presenter: &'a dyn Presenter,
        hook: Option<&'a dyn HookSink>,
    ) -> storage::Result<Self> {
        let watermark = WatermarkTracker::load(store, &target.user, &target.repo)?;
        Ok(Self {
            target,
            source,
            presenter,
            hook,
            seen: SeenSet::default(),
            watermark,
        })
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn watermark(&self) -> Timestamp {
        self.watermark.current()
    }

    /// Run one poll cycle.
    pub fn cycle(&mut self, mode: Mode) -> CycleOutcome {
        let Target { user, repo } = &self.target;

        let records = match self.source.fetch(user, repo) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(user, repo, error = %e, "failed to fetch activity");
                return CycleOutcome::FetchFailed;
            }
        };

        // Compare against the watermark as it stood when the cycle began.
        let watermark = self.watermark.current();
        let mut notifications = Vec::new();
        let mut unrecognized = 0;

        for record in &records {
            let fragment = match classify(record) {
                Classification::Message(fragment) => fragment,
                Classification::Ignored => continue,
                Classification::Unrecognized(kind) => {
                    tracing::warn!(kind, "event type not found");
                    unrecognized += 1;
                    continue;
                }
            };

            if !self.seen.should_emit(record.occurred_at, watermark, mode) {
                continue;
            }

            notifications.push(Notification::new(record, &fragment, resolve_link(record)));
        }

        if notifications.is_empty() {
            tracing::debug!(user, repo, fetched = records.len(), "no new activity");
            return CycleOutcome::Completed {
                emitted: 0,
                unrecognized,
            };
        }

        // The feed is newest first; display oldest first.
        notifications.reverse();

        self.presenter.present(&Batch {
            target: &self.target,
            mode,
            notifications: &notifications,
        });

        if let Some(hook) = self.hook {
            for notification in &notifications {
                hook.notify(notification, user, repo);
            }
        }

        if let Some(newest) = notifications.iter().map(|n| n.occurred_at).max() {
            self.watermark.advance(newest);
        }

        CycleOutcome::Completed {
            emitted: notifications.len(),
            unrecognized,
        }
    }
}
