//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its wire shape.
//! - Provide mutation helpers that keep title validation in one place.
//!
//! # Invariants
//! - `title.trim()` is never empty for a task created or edited through
//!   `Task::new` / `Task::replace_content`.
//! - `id` and `done` are never touched by content replacement.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier of one task inside a collection.
///
/// Serialized as a bare integer to match the stored record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl TaskId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Validation failures for task content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Checks that a title has visible content.
pub fn validate_title(title: &str) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(())
}

/// One to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Stored untrimmed.
    pub title: String,
    /// Free text, may be empty.
    pub desc: String,
    pub done: bool,
}

impl Task {
    /// Creates a pending task after validating its title.
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        desc: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        let title = title.into();
        validate_title(&title)?;
        Ok(Self {
            id,
            title,
            desc: desc.into(),
            done: false,
        })
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.done = !self.done;
    }

    /// Replaces title and description, keeping `id` and `done`.
    pub fn replace_content(
        &mut self,
        title: impl Into<String>,
        desc: impl Into<String>,
    ) -> Result<(), TaskValidationError> {
        let title = title.into();
        validate_title(&title)?;
        self.title = title;
        self.desc = desc.into();
        Ok(())
    }
}

/// Contents of the shared input form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub desc: String,
}

impl TaskForm {
    /// Form pre-filled from an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            desc: task.desc.clone(),
        }
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.desc.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.desc.is_empty()
    }
}

/// Which task, if any, the shared form is editing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(TaskId),
}

impl EditState {
    /// Returns the id under edit.
    pub fn target(self) -> Option<TaskId> {
        match self {
            Self::Idle => None,
            Self::Editing(id) => Some(id),
        }
    }

    pub fn is_editing(self) -> bool {
        matches!(self, Self::Editing(_))
    }
}
