//! Single-timeline queue of deferred work.
//!
//! Time is virtual: the owner moves it forward with [`Scheduler::pop_due`] and [`Scheduler::advance_to`], so
//! tests can replay a whole session without waiting and the browser only needs to arm one timeout for
//! [`Scheduler::next_due`].

use core::time::Duration;
use std::collections::BTreeMap;

/// Handle to a scheduled task, used for cancellation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId {
    due: Duration,
    seq: u64,
}

impl TimerId {
    pub fn due(self) -> Duration {
        self.due
    }
}

#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<TimerId, T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BTreeMap::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Tasks due at the same instant run in the order they were scheduled.
    pub fn schedule_at(&mut self, due: Duration, task: T) -> TimerId {
        let id = TimerId {
            due: due.max(self.now),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.queue.insert(id, task);
        id
    }

    pub fn schedule_in(&mut self, delay: Duration, task: T) -> TimerId {
        self.schedule_at(self.now.saturating_add(delay), task)
    }

    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.queue.remove(&id)
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.queue.len();
        self.queue.clear();
        cancelled
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.queue.first_key_value().map(|(id, _)| id.due)
    }

    /// Removes the earliest task due at or before `until` and moves the clock to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, T)> {
        let entry = self.queue.first_entry()?;
        if entry.key().due > until {
            return None;
        }
        let (id, task) = entry.remove_entry();
        self.now = self.now.max(id.due);
        Some((id, task))
    }

    /// Moves the clock forward without running anything; never goes back.
    pub fn advance_to(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}
