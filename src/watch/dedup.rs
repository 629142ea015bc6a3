//! Seen-set: timestamps already evaluated during this process.

use std::collections::HashSet;

use jiff::Timestamp;

use super::Mode;

/// Remembers every `occurred_at` evaluated so far. Never evicts; the set
/// lives as long as one invocation or one watch session.
#[derive(Debug, Default)]
pub struct SeenSet {
    seen: HashSet<Timestamp>,
}

impl SeenSet {
    /// Decide whether a record should be emitted, then remember it.
    ///
    /// In [`Mode::Latest`] everything is emitted. In [`Mode::Watch`] a
    /// record must be strictly newer than `watermark` and not seen before.
    pub fn should_emit(
        &mut self,
        occurred_at: Timestamp,
        watermark: Timestamp,
        mode: Mode,
    ) -> bool {
        let emit = match mode {
            Mode::Latest => true,
            Mode::Watch => occurred_at > watermark && !self.seen.contains(&occurred_at),
        };
        self.seen.insert(occurred_at);
        emit
    }

    #[cfg(test)]
    pub fn contains(&self, occurred_at: Timestamp) -> bool {
        self.seen.contains(&occurred_at)
    }
}
