use contactlist_core::db::migrations::latest_version;
use contactlist_core::db::{open_db, open_db_in_memory, schema_version, DbError};
use contactlist_core::{Contact, ContactRepository, SqliteContactRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    for table in ["contacts", "users", "authorities"] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn reopening_file_database_keeps_schema_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contactlist.db");

    let conn = open_db(&path).unwrap();
    let created = SqliteContactRepository::try_new(&conn)
        .unwrap()
        .add_contact(&Contact::new("Kept", "Row", "Acme", "1", "k@acme.example"))
        .unwrap();
    drop(conn);

    let reopened = open_db(&path).unwrap();
    assert_eq!(schema_version(&reopened).unwrap(), latest_version());
    let repo = SqliteContactRepository::try_new(&reopened).unwrap();
    assert_eq!(repo.list_contacts().unwrap(), vec![created]);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

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

#[test]
fn foreign_keys_are_enabled_on_opened_connections() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);

    let orphan = conn.execute(
        "INSERT INTO authorities (username, authority) VALUES ('ghost', 'ROLE_USER');",
        [],
    );
    assert!(orphan.is_err());
}

#[test]
fn contact_columns_have_no_implicit_defaults() {
    let conn = open_db_in_memory().unwrap();

    let partial = conn.execute(
        "INSERT INTO contacts (first_name, last_name) VALUES ('Only', 'Names');",
        [],
    );
    assert!(partial.is_err());

    let mut stmt = conn.prepare("PRAGMA table_info(contacts);").unwrap();
    let mut rows = stmt.query([]).unwrap();
    while let Some(row) = rows.next().unwrap() {
        let column: String = row.get(1).unwrap();
        let default: Option<String> = row.get(4).unwrap();
        assert!(default.is_none(), "column {column} has default {default:?}");
    }
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
