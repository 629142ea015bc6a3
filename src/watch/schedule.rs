//! Scheduling: run the poll cycle once, or forever on a fixed period.
//!
//! Watch mode re-arms only after a cycle has finished, so a slow fetch
//! pushes the next cycle back instead of overlapping it.

use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

use super::{CycleOutcome, Mode, Watcher};

/// Time between the end of one watch cycle and the start of the next.
pub const WATCH_PERIOD: Duration = Duration::from_secs(3 * 60);

/// Run a single listing cycle.
pub fn run_once(watcher: &mut Watcher<'_>) -> CycleOutcome {
    watcher.cycle(Mode::Latest)
}

/// Run watch cycles: one now, then one after every `period`.
///
/// `pause` is called between cycles and decides whether to keep going.
/// [`sleep`] never stops, so in production the loop only ends with the
/// process. Returns the number of cycles run.
pub fn run_watch<F>(watcher: &mut Watcher<'_>, period: Duration, mut pause: F) -> usize
where
    F: FnMut(Duration) -> ControlFlow<()>,
{
    let mut cycles = 0;
    loop {
        let outcome = watcher.cycle(Mode::Watch);
        cycles += 1;
        tracing::debug!(cycle = cycles, ?outcome, "watch cycle finished");

        if pause(period).is_break() {
            return cycles;
        }
    }
}

/// Block the thread for `period`. Always continues.
pub fn sleep(period: Duration) -> ControlFlow<()> {
    thread::sleep(period);
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::EventKind;
    use crate::model::fixtures::record;
    use crate::target::Target;
    use crate::watch::fakes::{MemoryStore, RecordingPresenter, ScriptedSource};

    fn target() -> Target {
        Target {
            user: "acme".into(),
            repo: "widgets".into(),
        }
    }

    #[test]
    fn run_once_is_a_single_latest_cycle() {
        let source = ScriptedSource::default();
        source.push_ok(vec![record(EventKind::Watch, "2024-03-01T12:00:00Z")]);
        let store = MemoryStore::default();
        let presenter = RecordingPresenter::default();
        let mut watcher = Watcher::new(target(), &source, &store, &presenter, None).unwrap();

        assert_eq!(run_once(&mut watcher).emitted(), Some(1));
        assert_eq!(source.calls.get(), 1);
        assert_eq!(presenter.batches.borrow()[0].0, Mode::Latest);
    }

    #[test]
    fn watch_runs_immediately_then_once_per_period() {
        let source = ScriptedSource::default();
        source.push_ok(Vec::new());
        let store = MemoryStore::default();
        let presenter = RecordingPresenter::default();
        let mut watcher = Watcher::new(target(), &source, &store, &presenter, None).unwrap();

        let mut pauses = Vec::new();
        let cycles = run_watch(&mut watcher, WATCH_PERIOD, |period| {
            pauses.push(period);
            if pauses.len() == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        assert_eq!(cycles, 3);
        assert_eq!(source.calls.get(), 3);
        assert_eq!(pauses, vec![Duration::from_secs(180); 3]);
    }

    #[test]
    fn fetch_errors_do_not_stop_the_loop() {
        let source = ScriptedSource::default();
        source
            .push_err("HTTP 502")
            .push_err("HTTP 502")
            .push_ok(vec![record(EventKind::Public, "2024-03-01T12:00:00Z")]);
        let store = MemoryStore::default();
        let presenter = RecordingPresenter::default();
        let mut watcher = Watcher::new(target(), &source, &store, &presenter, None).unwrap();

        let mut remaining = 3;
        run_watch(&mut watcher, Duration::ZERO, |_| {
            remaining -= 1;
            if remaining == 0 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        assert_eq!(source.calls.get(), 3);
        assert_eq!(presenter.emitted().len(), 1);
    }

    #[test]
    fn sleep_continues() {
        assert_eq!(sleep(Duration::ZERO), ControlFlow::Continue(()));
    }
}
