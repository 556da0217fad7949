//! Core state and persistence for the taskpad to-do list.
//! Presentation layers drive `TaskListController`; everything else here
//! backs it.

pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::ids::TaskIdAllocator;
pub use model::task::{validate_title, EditState, Task, TaskForm, TaskId, TaskValidationError};
pub use notify::{Locale, Message, MessageCatalog, Notification, Notifier, RecordingNotifier};
pub use repo::task_store::{
    decode_tasks, encode_tasks, MemoryTaskStore, SqliteTaskStore, StoreError, StoreResult,
    TaskStore, DEFAULT_STORAGE_KEY,
};
pub use service::task_list::{ControllerError, ControllerResult, TaskListController};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
