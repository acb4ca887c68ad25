//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `users` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every caller-supplied value is bound as a statement parameter.
//! - Lookup absence is `Ok(None)`; mutation-target absence is an error.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::schema::ensure_users_table;
use crate::db::DbError;
use crate::model::user::{User, UserId};
use log::{debug, warn};
use rusqlite::{params, Connection, Params, Row};
use thiserror::Error;

const SAVE_USER_SQL: &str = "INSERT INTO users (name, age) VALUES (?1, ?2);";
const FIND_ALL_SQL: &str = "SELECT id, name, age FROM users ORDER BY id ASC;";
const FIND_BY_ID_SQL: &str = "SELECT id, name, age FROM users WHERE id = ?1;";
const UPDATE_USER_SQL: &str = "UPDATE users SET name = ?1, age = ?2 WHERE id = ?3;";
const DELETE_USER_SQL: &str = "DELETE FROM users WHERE id = ?1;";

const INIT_FAILED: &str = "Failed to init database";
const SAVE_FAILED: &str = "Failed to save user to database";
const FIND_ALL_FAILED: &str = "Failed to get all users from database";
const FIND_BY_ID_FAILED: &str = "Failed to get user by id from database";
const UPDATE_FAILED: &str = "Failed to update user in database";
const DELETE_FAILED: &str = "Failed to delete user from database";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for user persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Update target does not exist.
    #[error("User with id {0} not found")]
    NotFound(UserId),
    /// Underlying storage failed; `context` names the operation.
    #[error("{context}")]
    Storage {
        context: &'static str,
        #[source]
        source: DbError,
    },
    /// A stored row violates user invariants.
    #[error("invalid persisted user data: {0}")]
    InvalidData(String),
}

/// Repository interface for user CRUD operations.
#[cfg_attr(test, mockall::automock)]
pub trait UserRepository {
    /// Inserts a user and returns the storage-assigned id.
    ///
    /// An absent `age` is forwarded as SQL `NULL` and rejected by the schema.
    fn create(&self, name: &str, age: Option<i32>) -> RepoResult<UserId>;
    /// Returns every user ordered by id.
    fn find_all(&self) -> RepoResult<Vec<User>>;
    fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;
    /// Overwrites name and age; fails with `NotFound` when no row matches.
    fn update(&self, id: UserId, name: &str, age: Option<i32>) -> RepoResult<()>;
    /// Removes a user; a missing row is reported as a storage failure.
    fn delete(&self, id: UserId) -> RepoResult<()>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Creates a repository over `conn`, creating the `users` table first.
    ///
    /// # Errors
    /// - `RepoError::Storage` when the table cannot be created or an existing
    ///   `users` table lacks a required column.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_users_table(conn).map_err(storage_error(INIT_FAILED))?;
        debug!("event=repo_init module=repo status=ok table=users");
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create(&self, name: &str, age: Option<i32>) -> RepoResult<UserId> {
        self.conn
            .execute(SAVE_USER_SQL, params![name, age])
            .map_err(storage_error(SAVE_FAILED))?;

        let id = UserId(self.conn.last_insert_rowid());
        debug!("event=user_save module=repo status=ok id={id}");
        Ok(id)
    }

    fn find_all(&self) -> RepoResult<Vec<User>> {
        let users = query_users(self.conn, FIND_ALL_SQL, [], FIND_ALL_FAILED)?;
        debug!(
            "event=user_find_all module=repo status=ok count={}",
            users.len()
        );
        Ok(users)
    }

    fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let users = query_users(self.conn, FIND_BY_ID_SQL, [id.get()], FIND_BY_ID_FAILED)?;
        Ok(users.into_iter().next())
    }

    fn update(&self, id: UserId, name: &str, age: Option<i32>) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(UPDATE_USER_SQL, params![name, age, id.get()])
            .map_err(storage_error(UPDATE_FAILED))?;

        if changed == 0 {
            warn!("event=user_update module=repo status=not_found id={id}");
            return Err(RepoError::NotFound(id));
        }

        debug!("event=user_update module=repo status=ok id={id}");
        Ok(())
    }

    fn delete(&self, id: UserId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(DELETE_USER_SQL, [id.get()])
            .map_err(storage_error(DELETE_FAILED))?;

        // Missing rows surface as a storage failure here, unlike `update`.
        if changed == 0 {
            warn!("event=user_delete module=repo status=error id={id} error_code=no_rows");
            return Err(RepoError::Storage {
                context: DELETE_FAILED,
                source: DbError::NoRowsAffected { id },
            });
        }

        debug!("event=user_delete module=repo status=ok id={id}");
        Ok(())
    }
}

/// Row as stored, before invariant checks.
struct StoredUserRow {
    id: i64,
    name: String,
    age: Option<i32>,
}

impl StoredUserRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            age: row.get("age")?,
        })
    }

    fn into_user(self) -> RepoResult<User> {
        if self.name.trim().is_empty() {
            return Err(RepoError::InvalidData(format!(
                "blank name in users.name for id {}",
                self.id
            )));
        }
        if let Some(age) = self.age.filter(|age| *age < 0) {
            return Err(RepoError::InvalidData(format!(
                "negative age `{age}` in users.age for id {}",
                self.id
            )));
        }

        Ok(User {
            id: UserId(self.id),
            name: self.name,
            age: self.age,
        })
    }
}

fn query_users<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    context: &'static str,
) -> RepoResult<Vec<User>> {
    let rows = fetch_rows(conn, sql, params).map_err(storage_error(context))?;
    rows.into_iter().map(StoredUserRow::into_user).collect()
}

fn fetch_rows<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> rusqlite::Result<Vec<StoredUserRow>> {
    let mut stmt = conn.prepare(sql)?;
    let mapped = stmt.query_map(params, StoredUserRow::read)?;
    let rows = mapped.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn storage_error<E: Into<DbError>>(context: &'static str) -> impl FnOnce(E) -> RepoError {
    move |err| RepoError::Storage {
        context,
        source: err.into(),
    }
}
