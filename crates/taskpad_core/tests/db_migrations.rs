use rusqlite::Connection;
use std::time::{SystemTime, UNIX_EPOCH};
use taskpad_core::db::migrations::{apply_migrations, latest_version, pending_versions};
use taskpad_core::db::{open_db, open_db_in_memory, DbError};
use taskpad_core::{SqliteTaskStore, Task, TaskId, TaskStore};

#[test]
fn fresh_database_gets_storage_entries_schema() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(
        entry_columns(&conn),
        vec![
            ("key".to_string(), "TEXT".to_string(), true, true),
            ("value".to_string(), "TEXT".to_string(), true, false),
            ("updated_at".to_string(), "INTEGER".to_string(), true, false),
        ]
    );
}

#[test]
fn updated_at_default_is_epoch_millis() {
    let conn = open_db_in_memory().unwrap();
    let before = now_millis();

    conn.execute(
        "INSERT INTO storage_entries (key, value) VALUES ('raw', '[]');",
        [],
    )
    .unwrap();

    let after = now_millis();

    // Whole-second stamps would fall up to 999ms before `before`.
    let stamp = updated_at(&conn, "raw");
    assert!(
        (before - 1..=after + 1).contains(&stamp),
        "stamp {stamp} outside [{before}, {after}]"
    );
}

#[test]
fn saving_refreshes_updated_at_in_millis() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteTaskStore::try_new(&conn).unwrap();
    let before = now_millis();

    store
        .save(&[Task::new(TaskId(1), "Buy milk", "").unwrap()])
        .unwrap();
    conn.execute("UPDATE storage_entries SET updated_at = 5 WHERE key = 'tasks';", [])
        .unwrap();
    store.save(&[]).unwrap();
    let after = now_millis();

    let stamp = updated_at(&conn, "tasks");
    assert!(
        (before - 1..=after + 1).contains(&stamp),
        "stamp {stamp} outside [{before}, {after}]"
    );
}

#[test]
fn entries_survive_reopening_without_remigrating() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskpad.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        conn.execute(
            "INSERT INTO storage_entries (key, value) VALUES ('tasks', '[]');",
            [],
        )
        .unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM storage_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn runner_applies_pending_steps_once() {
    let mut conn = Connection::open_in_memory().unwrap();
    assert_eq!(pending_versions(&conn).unwrap(), vec![1]);

    assert_eq!(apply_migrations(&mut conn).unwrap(), vec![1]);
    assert_eq!(schema_version(&conn), latest_version());
    assert!(pending_versions(&conn).unwrap().is_empty());

    assert!(apply_migrations(&mut conn).unwrap().is_empty());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

/// `(name, type, not_null, primary_key)` per column, in declaration order.
fn entry_columns(conn: &Connection) -> Vec<(String, String, bool, bool)> {
    let mut stmt = conn
        .prepare("SELECT name, type, \"notnull\", pk FROM pragma_table_info('storage_entries');")
        .unwrap();
    stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, i64>(2)? == 1,
            row.get::<_, i64>(3)? > 0,
        ))
    })
    .unwrap()
    .collect::<Result<_, _>>()
    .unwrap()
}

fn updated_at(conn: &Connection, key: &str) -> i64 {
    conn.query_row(
        "SELECT updated_at FROM storage_entries WHERE key = ?1;",
        [key],
        |row| row.get(0),
    )
    .unwrap()
}

fn now_millis() -> i64 {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis();
    i64::try_from(millis).unwrap()
}
