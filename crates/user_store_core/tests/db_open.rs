use rusqlite::Connection;
use std::time::Duration;
use user_store_core::db::{open_db, open_db_in_memory};
use user_store_core::{
    SqliteUserRepository, StoreConfig, User, UserRepository, UserService, UserId,
};

#[test]
fn open_db_does_not_create_schema_by_itself() {
    let conn = open_db_in_memory().unwrap();

    assert!(!table_exists(&conn, "users"));
    SqliteUserRepository::try_new(&conn).unwrap();
    assert!(table_exists(&conn, "users"));
}

#[test]
fn file_database_keeps_users_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::file(dir.path().join("users.db"));

    let conn_first = open_db(&config).unwrap();
    let id = {
        let service = UserService::new(SqliteUserRepository::try_new(&conn_first).unwrap());
        service.save_user(Some("Bob"), Some(18)).unwrap()
    };
    drop(conn_first);

    let conn_second = open_db(&config).unwrap();
    let repo = SqliteUserRepository::try_new(&conn_second).unwrap();
    assert_eq!(
        repo.find_by_id(id).unwrap(),
        Some(User::new(id, "Bob", 18))
    );
}

#[test]
fn separate_in_memory_connections_do_not_share_rows() {
    let conn_a = open_db_in_memory().unwrap();
    let conn_b = open_db_in_memory().unwrap();
    let repo_a = SqliteUserRepository::try_new(&conn_a).unwrap();
    let repo_b = SqliteUserRepository::try_new(&conn_b).unwrap();

    repo_a.create("Bob", Some(18)).unwrap();

    assert!(repo_b.find_by_id(UserId(1)).unwrap().is_none());
}

#[test]
fn open_db_fails_for_unreachable_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::file(dir.path().join("missing").join("users.db"));

    assert!(open_db(&config).is_err());
}

#[test]
fn busy_timeout_from_config_is_applied() {
    let config = StoreConfig {
        busy_timeout: Duration::from_millis(1234),
        ..StoreConfig::in_memory()
    };
    let conn = open_db(&config).unwrap();

    let timeout_ms: i64 = conn
        .query_row("PRAGMA busy_timeout;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(timeout_ms, 1234);
}

fn table_exists(conn: &Connection, table_name: &str) -> bool {
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
    exists == 1
}
