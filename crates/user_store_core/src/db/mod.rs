//! SQLite storage bootstrap and schema entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections from a `StoreConfig`.
//! - Create the `users` table when it does not exist yet.
//!
//! # Invariants
//! - Schema creation is idempotent.
//! - Repositories must not run queries before `ensure_users_table` succeeds.

use crate::model::user::UserId;
use thiserror::Error;

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Low-level storage failure.
#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("Incorrect id={id}")]
    NoRowsAffected { id: UserId },
    #[error("table `{table}` is missing required column `{column}`")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("column `{table}.{column}` must be NOT NULL")]
    NullableColumn {
        table: &'static str,
        column: &'static str,
    },
}
