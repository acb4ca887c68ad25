//! `users` table definition.

use super::{DbError, DbResult};
use rusqlite::Connection;

pub const USERS_TABLE: &str = "users";

// (column, must be declared NOT NULL). `id` is the rowid alias and never null.
const REQUIRED_USER_COLUMNS: &[(&str, bool)] = &[("id", false), ("name", true), ("age", true)];

const CREATE_USERS_SQL: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    age INTEGER NOT NULL
);";

/// Creates the `users` table if missing and checks the columns of an
/// existing one, including their NOT NULL constraints.
pub fn ensure_users_table(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_USERS_SQL)?;

    let mut stmt = conn.prepare("SELECT name, \"notnull\" FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([USERS_TABLE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, bool>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    for &(required, needs_not_null) in REQUIRED_USER_COLUMNS {
        let Some(&(_, not_null)) = columns.iter().find(|(name, _)| name.as_str() == required)
        else {
            return Err(DbError::MissingRequiredColumn {
                table: USERS_TABLE,
                column: required,
            });
        };
        if needs_not_null && !not_null {
            return Err(DbError::NullableColumn {
                table: USERS_TABLE,
                column: required,
            });
        }
    }

    Ok(())
}
