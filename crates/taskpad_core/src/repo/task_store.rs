//! Task collection persistence.
//!
//! # Responsibility
//! - Persist the full task collection as one serialized entry under a key,
//!   the same shape a browser local-storage entry would have.
//! - Provide a SQLite-backed store and an in-memory store.
//!
//! # Invariants
//! - The payload is a JSON array of `{id, title, desc, done}` records.
//! - Duplicate ids in a persisted payload are rejected on load.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::task::{Task, TaskId};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key used when callers do not pick one.
pub const DEFAULT_STORAGE_KEY: &str = "tasks";

const ENTRIES_TABLE: &str = "storage_entries";
const ENTRIES_COLUMNS: &[&str] = &["key", "value", "updated_at"];

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage surface failure.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialization(serde_json::Error),
    InvalidData(String),
    /// Storage refused the write (quota, disabled storage, ...).
    Unavailable(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "task payload encoding failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Storage surface for the task collection.
pub trait TaskStore {
    /// Returns the persisted collection, or `None` when nothing was saved yet.
    fn load(&self) -> StoreResult<Option<Vec<Task>>>;
    /// Replaces the persisted collection with `tasks`.
    fn save(&mut self, tasks: &[Task]) -> StoreResult<()>;
}

impl<T: TaskStore + ?Sized> TaskStore for Box<T> {
    fn load(&self) -> StoreResult<Option<Vec<Task>>> {
        (**self).load()
    }

    fn save(&mut self, tasks: &[Task]) -> StoreResult<()> {
        (**self).save(tasks)
    }
}

/// Serializes a collection into the stored payload format.
pub fn encode_tasks(tasks: &[Task]) -> StoreResult<String> {
    Ok(serde_json::to_string(tasks)?)
}

/// Parses a stored payload, rejecting duplicate ids.
pub fn decode_tasks(payload: &str) -> StoreResult<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(payload).map_err(|err| {
        StoreError::InvalidData(format!("payload is not a task record list: {err}"))
    })?;

    let mut seen: HashSet<TaskId> = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id) {
            return Err(StoreError::InvalidData(format!(
                "duplicate task id `{}`",
                task.id
            )));
        }
    }

    Ok(tasks)
}

/// SQLite-backed key-value task store.
pub struct SqliteTaskStore<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl<'conn> SqliteTaskStore<'conn> {
    /// Creates a store under `DEFAULT_STORAGE_KEY`.
    ///
    /// # Errors
    /// - Rejects connections that were not opened through `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        Self::try_with_key(conn, DEFAULT_STORAGE_KEY)
    }

    /// Creates a store persisting under a caller-chosen key.
    pub fn try_with_key(conn: &'conn Connection, key: impl Into<String>) -> StoreResult<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(StoreError::InvalidData(
                "storage key cannot be empty".to_string(),
            ));
        }
        ensure_schema_ready(conn)?;
        Ok(Self { conn, key })
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl TaskStore for SqliteTaskStore<'_> {
    fn load(&self) -> StoreResult<Option<Vec<Task>>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM storage_entries WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(payload) => {
                let tasks = decode_tasks(&payload).inspect_err(|err| {
                    error!(
                        "event=store_load module=repo status=error key={} error={}",
                        self.key, err
                    );
                })?;
                debug!(
                    "event=store_load module=repo status=ok key={} count={}",
                    self.key,
                    tasks.len()
                );
                Ok(Some(tasks))
            }
            None => {
                debug!(
                    "event=store_load module=repo status=empty key={}",
                    self.key
                );
                Ok(None)
            }
        }
    }

    fn save(&mut self, tasks: &[Task]) -> StoreResult<()> {
        let payload = encode_tasks(tasks)?;
        self.conn.execute(
            "INSERT INTO storage_entries (key, value, updated_at)
             VALUES (?1, ?2, CAST(unixepoch('subsec') * 1000 AS INTEGER))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key.as_str(), payload],
        )?;
        debug!(
            "event=store_save module=repo status=ok key={} count={}",
            self.key,
            tasks.len()
        );
        Ok(())
    }
}

/// In-process store keeping the last serialized payload.
///
/// Uses the same codec as the SQLite store, so round-trip behavior matches.
#[derive(Debug, Default, Clone)]
pub struct MemoryTaskStore {
    payload: Option<String>,
    save_count: usize,
    fail_saves: bool,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated as if `tasks` had been saved earlier.
    pub fn with_tasks(tasks: &[Task]) -> StoreResult<Self> {
        Ok(Self {
            payload: Some(encode_tasks(tasks)?),
            ..Self::default()
        })
    }

    /// Store pre-populated with a raw payload, valid or not.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            ..Self::default()
        }
    }

    /// Makes subsequent saves fail, simulating unavailable storage.
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// Number of successful saves since construction.
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl TaskStore for MemoryTaskStore {
    fn load(&self) -> StoreResult<Option<Vec<Task>>> {
        self.payload.as_deref().map(decode_tasks).transpose()
    }

    fn save(&mut self, tasks: &[Task]) -> StoreResult<()> {
        if self.fail_saves {
            return Err(StoreError::Unavailable(
                "memory store is not accepting writes".to_string(),
            ));
        }
        self.payload = Some(encode_tasks(tasks)?);
        self.save_count += 1;
        Ok(())
    }
}

fn ensure_schema_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([ENTRIES_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<HashSet<_>, _>>()?;

    if columns.is_empty() {
        return Err(StoreError::MissingRequiredTable(ENTRIES_TABLE));
    }
    for column in ENTRIES_COLUMNS {
        if !columns.contains(*column) {
            return Err(StoreError::MissingRequiredColumn {
                table: ENTRIES_TABLE,
                column: *column,
            });
        }
    }

    Ok(())
}
