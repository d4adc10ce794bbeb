use minuta_core::db::migrations::{apply_migrations, latest_version};
use minuta_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;
use tempfile::tempdir;

fn user_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_exists(conn: &Connection, table: &str) -> bool {
    conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [table],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn open_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(user_version(&conn), latest_version());
    assert!(table_exists(&conn, "namespace_blobs"));
    assert!(table_exists(&conn, "session_slot"));
    assert!(table_exists(&conn, "credentials"));
}

#[test]
fn apply_migrations_is_idempotent() {
    let mut conn = Connection::open_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();
    apply_migrations(&mut conn).unwrap();
    assert_eq!(user_version(&conn), latest_version());
}

#[test]
fn newer_schema_version_is_rejected() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version() + 1))
        .unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    assert!(matches!(err, DbError::UnsupportedSchemaVersion { .. }));
}

#[test]
fn file_database_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("minuta.db");

    {
        let conn = open_db(&path).unwrap();
        conn.execute(
            "INSERT INTO namespace_blobs (namespace, kind, payload) VALUES ('guest', 'templates', '[]');",
            [],
        )
        .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let payload: String = conn
        .query_row(
            "SELECT payload FROM namespace_blobs WHERE namespace = 'guest' AND kind = 'templates';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(payload, "[]");
}
