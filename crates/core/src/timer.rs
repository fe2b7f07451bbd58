//! Simulated-time scheduler for the session's timed transitions.
//!
//! Every event carries the session generation that scheduled it. The game
//! compares that tag against its current generation before applying an
//! event, so a restart can never be touched by a stale chain.

use std::collections::BTreeMap;

use crate::types::TimerKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScheduledEvent {
    pub due_at_ms: u64,
    pub kind: TimerKind,
    pub generation: u64,
}

/// Events ordered by due time, ties broken by scheduling order.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    queue: BTreeMap<(u64, u64), ScheduledEvent>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_after(
        &mut self,
        now_ms: u64,
        delay_ms: u64,
        kind: TimerKind,
        generation: u64,
    ) -> ScheduledEvent {
        let event = ScheduledEvent { due_at_ms: now_ms.saturating_add(delay_ms), kind, generation };
        self.queue.insert((event.due_at_ms, self.next_seq), event);
        self.next_seq += 1;
        event
    }

    /// Drops every pending event tagged with `generation`.
    pub fn cancel_all(&mut self, generation: u64) -> usize {
        let before = self.queue.len();
        self.queue.retain(|_, event| event.generation != generation);
        before - self.queue.len()
    }

    /// Removes and returns the earliest event due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<ScheduledEvent> {
        let entry = self.queue.first_entry()?;
        if entry.key().0 > now_ms {
            return None;
        }
        Some(entry.remove())
    }

    pub fn next_due_at(&self) -> Option<u64> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledEvent> {
        self.queue.values()
    }
}
