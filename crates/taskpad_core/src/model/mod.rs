//! Task list domain model.
//!
//! # Responsibility
//! - Define the task record persisted by the storage surface.
//! - Define transient UI-facing state (shared input form, edit marker).
//! - Allocate task identifiers.
//!
//! # Invariants
//! - Every task is identified by a `TaskId` unique within its collection.
//! - Titles are non-empty after trimming, but stored exactly as entered.

pub mod ids;
pub mod task;
