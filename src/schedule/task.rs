//! Scheduled task types.

use serde::{Deserialize, Serialize};

/// Unique identifier for a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl TaskId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// Game generation. Bumped on every reset; tasks from an older epoch are stale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Epoch(pub u64);

impl Epoch {
    /// The following generation.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// What a deferred callback does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// One timer interval elapsed.
    Tick,
    /// Turn a mismatched pair back face down.
    ConcealMismatch,
}

/// A deferred callback waiting in the queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub id: TaskId,
    /// Virtual time at which the task fires.
    pub due_ms: u64,
    /// Epoch the task was scheduled in.
    pub epoch: Epoch,
    pub kind: TaskKind,
}

/// Ownership of the single repeating timer tick.
///
/// Names the tick currently queued; rescheduling moves the handle to the
/// new task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerHandle {
    pub task: TaskId,
    pub epoch: Epoch,
    pub interval_ms: u64,
}

impl TimerHandle {
    /// Does this handle own `task`?
    #[must_use]
    pub fn owns(&self, task: &ScheduledTask) -> bool {
        self.task == task.id && self.epoch == task.epoch
    }
}
