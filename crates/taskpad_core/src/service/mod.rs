//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model mutations, persistence and user feedback.
//! - Keep presentation layers decoupled from storage details.

pub mod task_list;
