//! Task identifier allocation.
//!
//! Ids come from a counter seeded past the largest id already in the
//! collection, so two tasks created in the same instant never collide.

use crate::model::task::{Task, TaskId};

const FIRST_TASK_ID: i64 = 1;

/// Monotonic id source for one controller session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskIdAllocator {
    next: Option<i64>,
}

impl TaskIdAllocator {
    /// Starts at `FIRST_TASK_ID` for an empty collection.
    pub fn new() -> Self {
        Self {
            next: Some(FIRST_TASK_ID),
        }
    }

    /// Seeds the counter past every id in `tasks`.
    ///
    /// Persisted ids may be wall-clock millis from older data; they are
    /// honored as-is and new ids continue above them.
    pub fn seeded_from(tasks: &[Task]) -> Self {
        match tasks.iter().map(|task| task.id.get()).max() {
            Some(max) => Self {
                next: max.checked_add(1).map(|next| next.max(FIRST_TASK_ID)),
            },
            None => Self::new(),
        }
    }

    /// Peeks at the id the next `allocate` call would return.
    pub fn peek(&self) -> Option<TaskId> {
        self.next.map(TaskId)
    }

    /// Returns a fresh id, or `None` once the id space is exhausted.
    pub fn allocate(&mut self) -> Option<TaskId> {
        let current = self.next?;
        self.next = current.checked_add(1);
        Some(TaskId(current))
    }
}

impl Default for TaskIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
