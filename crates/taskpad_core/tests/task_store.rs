use rusqlite::Connection;
use taskpad_core::db::migrations::latest_version;
use taskpad_core::db::{open_db, open_db_in_memory};
use taskpad_core::{
    decode_tasks, MemoryTaskStore, SqliteTaskStore, StoreError, Task, TaskId, TaskStore,
};

fn sample_tasks() -> Vec<Task> {
    let mut done = Task::new(TaskId(20), "Call mom", "after 6pm").unwrap();
    done.done = true;
    vec![
        Task::new(TaskId(30), "Buy milk", "").unwrap(),
        done,
        Task::new(TaskId(10), "  padded  ", "multi\nline").unwrap(),
    ]
}

#[test]
fn fresh_store_loads_nothing() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();

    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn save_then_load_roundtrips_order_and_fields() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteTaskStore::try_new(&conn).unwrap();
    let tasks = sample_tasks();

    store.save(&tasks).unwrap();
    assert_eq!(store.load().unwrap(), Some(tasks.clone()));

    let reloaded = store.load().unwrap().unwrap();
    store.save(&reloaded).unwrap();
    assert_eq!(store.load().unwrap(), Some(tasks));
}

#[test]
fn saving_empty_collection_is_distinct_from_absent() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteTaskStore::try_new(&conn).unwrap();

    store.save(&sample_tasks()).unwrap();
    store.save(&[]).unwrap();
    assert_eq!(store.load().unwrap(), Some(Vec::new()));
}

#[test]
fn stored_payload_is_a_json_record_list_under_the_key() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteTaskStore::try_new(&conn).unwrap();
    store
        .save(&[Task::new(TaskId(1), "Buy milk", "").unwrap()])
        .unwrap();

    let payload: String = conn
        .query_row(
            "SELECT value FROM storage_entries WHERE key = 'tasks';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "id": 1, "title": "Buy milk", "desc": "", "done": false }])
    );
}

#[test]
fn keys_are_isolated() {
    let conn = open_db_in_memory().unwrap();
    let mut work = SqliteTaskStore::try_with_key(&conn, "work").unwrap();
    let home = SqliteTaskStore::try_with_key(&conn, "home").unwrap();

    work.save(&sample_tasks()).unwrap();
    assert_eq!(home.load().unwrap(), None);
    assert_eq!(work.key(), "work");
}

#[test]
fn empty_key_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let result = SqliteTaskStore::try_with_key(&conn, "  ");
    assert!(matches!(result, Err(StoreError::InvalidData(_))));
}

#[test]
fn data_survives_reopening_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskpad.sqlite3");
    let tasks = sample_tasks();

    {
        let conn = open_db(&path).unwrap();
        let mut store = SqliteTaskStore::try_new(&conn).unwrap();
        store.save(&tasks).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteTaskStore::try_new(&conn).unwrap();
    assert_eq!(store.load().unwrap(), Some(tasks));
}

#[test]
fn load_rejects_corrupt_payload() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO storage_entries (key, value) VALUES ('tasks', '{\"not\":\"a list\"}');",
        [],
    )
    .unwrap();

    let store = SqliteTaskStore::try_new(&conn).unwrap();
    assert!(matches!(store.load(), Err(StoreError::InvalidData(_))));
}

#[test]
fn decode_rejects_duplicate_ids() {
    let payload = r#"[
        {"id": 5, "title": "a", "desc": "", "done": false},
        {"id": 5, "title": "b", "desc": "", "done": true}
    ]"#;

    let err = decode_tasks(payload).unwrap_err();
    assert!(err.to_string().contains("duplicate task id `5`"), "{err}");
}

#[test]
fn store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteTaskStore::try_new(&conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn store_rejects_connection_without_entries_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteTaskStore::try_new(&conn),
        Err(StoreError::MissingRequiredTable("storage_entries"))
    ));
}

#[test]
fn store_rejects_connection_missing_entries_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE storage_entries (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteTaskStore::try_new(&conn),
        Err(StoreError::MissingRequiredColumn {
            table: "storage_entries",
            column: "updated_at"
        })
    ));
}

#[test]
fn memory_store_roundtrips_and_counts_saves() {
    let mut store = MemoryTaskStore::new();
    assert_eq!(store.load().unwrap(), None);

    let tasks = sample_tasks();
    store.save(&tasks).unwrap();
    store.save(&tasks).unwrap();
    assert_eq!(store.save_count(), 2);
    assert_eq!(store.load().unwrap(), Some(tasks));
}

#[test]
fn memory_store_can_simulate_unavailable_storage() {
    let tasks = sample_tasks();
    let mut store = MemoryTaskStore::with_tasks(&tasks).unwrap();
    store.set_fail_saves(true);

    let err = store.save(&[]).unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
    assert_eq!(store.save_count(), 0);
    assert_eq!(store.load().unwrap(), Some(tasks));
}
