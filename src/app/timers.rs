//! Virtual millisecond clock with cancellable one-shot timers.
//!
//! The host advances the clock explicitly (`wait <ms>`), so long-press
//! detection is deterministic under test.

use crate::gesture::TimerId;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now_ms: u64,
    /// Deadline → timers due at that instant, in scheduling order.
    pending: BTreeMap<u64, Vec<TimerId>>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule(&mut self, id: TimerId, delay_ms: u64) {
        let deadline = self.now_ms.saturating_add(delay_ms);
        self.pending.entry(deadline).or_default().push(id);
        tracing::trace!(timer = %id, deadline, "timer scheduled");
    }

    /// Removes a pending timer. Cancelling an unknown or fired timer is a no-op.
    pub fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|_, ids| {
            ids.retain(|pending| *pending != id);
            !ids.is_empty()
        });
    }

    #[cfg(test)]
    fn is_pending(&self, id: TimerId) -> bool {
        self.pending.values().any(|ids| ids.contains(&id))
    }

    /// Moves the clock forward and returns the timers that came due, earliest first.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<(u64, TimerId)> {
        self.now_ms = self.now_ms.saturating_add(delta_ms);
        let later = self.pending.split_off(&self.now_ms.saturating_add(1));
        let due = std::mem::replace(&mut self.pending, later);
        due.into_iter()
            .flat_map(|(deadline, ids)| ids.into_iter().map(move |id| (deadline, id)))
            .collect()
    }
}
