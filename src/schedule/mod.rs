//! Deferred callbacks on a virtual clock.
//!
//! The game is single-threaded and event driven. The only deferred work is
//! the repeating timer tick and the mismatch conceal, both modelled as
//! tasks on a cooperative queue. The host advances the clock; due tasks
//! come out in `(due_ms, id)` order, so ties resolve in scheduling order.
//!
//! ## Example Usage
//!
//! ```
//! use memory_match::schedule::{Epoch, Scheduler, TaskKind};
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.schedule(500, Epoch::default(), TaskKind::ConcealMismatch).unwrap();
//!
//! assert!(scheduler.pop_due(499).is_none());
//! let task = scheduler.pop_due(500).unwrap();
//! assert_eq!(task.kind, TaskKind::ConcealMismatch);
//! assert_eq!(scheduler.now_ms(), 500);
//! ```

mod task;

pub use task::{Epoch, ScheduledTask, TaskId, TaskKind, TimerHandle};

use std::collections::BTreeMap;

/// Virtual-clock task queue.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    queue: BTreeMap<(u64, TaskId), ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Move the clock forward. The clock never runs backwards.
    pub fn set_now(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }

    /// Queue a task to fire `delay_ms` from now.
    ///
    /// Returns `None`, queueing nothing, when the due time would overflow
    /// the clock.
    pub fn schedule(&mut self, delay_ms: u64, epoch: Epoch, kind: TaskKind) -> Option<TaskId> {
        let Some(due_ms) = self.now_ms.checked_add(delay_ms) else {
            log::trace!("not scheduling {:?}: clock overflow", kind);
            return None;
        };
        let id = TaskId::new(self.next_id);
        self.next_id += 1;

        let task = ScheduledTask { id, due_ms, epoch, kind };
        log::trace!("scheduled {:?} as {} due at {}ms", kind, id, due_ms);
        self.queue.insert((due_ms, id), task);
        Some(id)
    }

    /// Remove a pending task. Returns whether it was still queued.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let key = self.queue.iter().find(|(_, t)| t.id == id).map(|(k, _)| *k);
        match key {
            Some(key) => {
                self.queue.remove(&key);
                log::trace!("cancelled {}", id);
                true
            }
            None => false,
        }
    }

    /// Drop every pending task. The clock keeps its time.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Take the earliest task due at or before `until_ms`.
    ///
    /// The clock advances to the task's due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<ScheduledTask> {
        let (&key, _) = self.queue.iter().next()?;
        if key.0 > until_ms {
            return None;
        }
        let task = self.queue.remove(&key)?;
        self.set_now(task.due_ms);
        Some(task)
    }

    /// Pending tasks in firing order.
    pub fn pending(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.queue.values()
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_fire_in_time_order() {
        let mut scheduler = Scheduler::new();
        let epoch = Epoch::default();

        let late = scheduler.schedule(1000, epoch, TaskKind::Tick).unwrap();
        let early = scheduler.schedule(500, epoch, TaskKind::ConcealMismatch).unwrap();

        assert_eq!(scheduler.pop_due(2000).unwrap().id, early);
        assert_eq!(scheduler.now_ms(), 500);
        assert_eq!(scheduler.pop_due(2000).unwrap().id, late);
        assert_eq!(scheduler.now_ms(), 1000);
        assert!(scheduler.pop_due(2000).is_none());
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut scheduler = Scheduler::new();
        let epoch = Epoch::default();

        let first = scheduler.schedule(500, epoch, TaskKind::Tick).unwrap();
        let second = scheduler.schedule(500, epoch, TaskKind::ConcealMismatch).unwrap();

        assert_eq!(scheduler.pop_due(500).unwrap().id, first);
        assert_eq!(scheduler.pop_due(500).unwrap().id, second);
    }

    #[test]
    fn test_not_due_stays_queued() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(500, Epoch::default(), TaskKind::Tick).unwrap();

        assert!(scheduler.pop_due(499).is_none());
        assert_eq!(scheduler.pending_count(), 1);
        assert_eq!(scheduler.now_ms(), 0);
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut scheduler = Scheduler::new();
        scheduler.set_now(1200);
        scheduler.schedule(500, Epoch::default(), TaskKind::Tick).unwrap();

        assert_eq!(scheduler.pending().next().unwrap().due_ms, 1700);
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut scheduler = Scheduler::new();
        scheduler.set_now(100);
        scheduler.set_now(50);
        assert_eq!(scheduler.now_ms(), 100);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(500, Epoch::default(), TaskKind::Tick).unwrap();

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_clear_keeps_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.set_now(300);
        scheduler.schedule(500, Epoch::default(), TaskKind::Tick).unwrap();
        scheduler.schedule(900, Epoch::default(), TaskKind::ConcealMismatch).unwrap();

        scheduler.clear();

        assert!(scheduler.is_idle());
        assert_eq!(scheduler.now_ms(), 300);
    }

    #[test]
    fn test_overflowing_due_time_is_refused() {
        let mut scheduler = Scheduler::new();
        scheduler.set_now(u64::MAX - 100);

        assert!(scheduler.schedule(101, Epoch::default(), TaskKind::Tick).is_none());
        assert!(scheduler.is_idle());

        let id = scheduler.schedule(100, Epoch::default(), TaskKind::Tick);
        assert!(id.is_some());
        assert_eq!(scheduler.pop_due(u64::MAX).unwrap().due_ms, u64::MAX);
    }

    #[test]
    fn test_ids_are_unique_after_clear() {
        let mut scheduler = Scheduler::new();
        let a = scheduler.schedule(10, Epoch::default(), TaskKind::Tick).unwrap();
        scheduler.clear();
        let b = scheduler.schedule(10, Epoch::default(), TaskKind::Tick).unwrap();
        assert_ne!(a, b);
    }
}
