//! Schema steps for the storage surface and the runner that applies them.
//!
//! # Invariants
//! - Step versions start at 1 and increase by exactly one.
//! - A database's `PRAGMA user_version` equals the last step applied to it.
//! - All pending steps of one open share a single transaction.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "storage_entries",
    sql: include_str!("0001_storage_entries.sql"),
}];

/// Schema version a fully migrated database carries.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Reads the schema version stamped on `conn`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Versions that `apply_migrations` would run on `conn`, oldest first.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when `conn` was written by a newer
///   binary.
pub fn pending_versions(conn: &Connection) -> DbResult<Vec<u32>> {
    let current = current_user_version(conn)?;
    let latest = latest_version();
    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }

    Ok(SCHEMA_STEPS
        .iter()
        .map(|step| step.version)
        .filter(|version| *version > current)
        .collect())
}

/// Brings `conn` up to `latest_version`, returning the versions it applied.
///
/// An already current database is left untouched and yields an empty list.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<Vec<u32>> {
    let pending = pending_versions(conn)?;
    if pending.is_empty() {
        return Ok(pending);
    }

    let tx = conn.transaction()?;
    for step in SCHEMA_STEPS.iter().filter(|step| pending.contains(&step.version)) {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=db_migrate module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    Ok(pending)
}
