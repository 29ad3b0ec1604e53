use rusqlite::Connection;
use scenario_core::db::migrations::latest_version;
use scenario_core::db::{open_db, open_db_in_memory, DbError};
use scenario_core::{KeyValueStore, SqliteKeyValueStore, StorageError};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_slots");
}

#[test]
fn reopening_a_slot_file_keeps_values_and_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenario.sqlite3");

    let mut first = SqliteKeyValueStore::open(&path).unwrap();
    first.set("scenario-editor-v7", "[]").unwrap();
    drop(first);

    let second = SqliteKeyValueStore::open(&path).unwrap();
    assert_eq!(
        second.get("scenario-editor-v7").unwrap().as_deref(),
        Some("[]")
    );
    assert!(second.updated_at("scenario-editor-v7").unwrap().is_some());

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
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

    let storage_error = SqliteKeyValueStore::open(&path).err().unwrap();
    assert!(matches!(storage_error, StorageError::Db(_)));
}

#[test]
fn unmigrated_connection_is_not_accepted_as_slot_storage() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(matches!(
        SqliteKeyValueStore::try_new(conn),
        Err(StorageError::Unavailable(_))
    ));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "expected table `{table_name}` to exist");
}
