//! Storage surface contracts and implementations.
//!
//! # Responsibility
//! - Define the load/save contract for the whole task collection.
//! - Isolate SQLite and JSON encoding details from the controller.
//!
//! # Invariants
//! - `load` after `save(c)` reproduces `c` exactly (order and fields).
//! - Read paths reject invalid persisted state instead of masking it.

pub mod task_store;
