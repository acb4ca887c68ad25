//! Storage configuration.
//!
//! # Responsibility
//! - Describe where the user database lives and how long to wait on locks.
//! - Read those settings from the process environment on request.
//!
//! # Invariants
//! - Configuration is an explicit value passed to `db::open_db`; nothing is
//!   stored process-wide.

use std::env::VarError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the database file.
pub const DB_PATH_VAR: &str = "USER_STORE_DB_PATH";
/// Environment variable holding the busy timeout in milliseconds.
pub const BUSY_TIMEOUT_VAR: &str = "USER_STORE_BUSY_TIMEOUT_MS";

const MEMORY_PATH_SENTINEL: &str = ":memory:";
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Where the SQLite database is stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DbLocation {
    /// Private in-memory database; contents vanish with the connection.
    #[default]
    Memory,
    /// Database file on disk, created when missing.
    File(PathBuf),
}

/// Connection settings for the user store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub location: DbLocation,
    pub busy_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: DbLocation::Memory,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

impl StoreConfig {
    /// Configuration for an in-memory database.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Configuration for a database file at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: DbLocation::File(path.into()),
            ..Self::default()
        }
    }

    /// Reads configuration from `USER_STORE_DB_PATH` and
    /// `USER_STORE_BUSY_TIMEOUT_MS`.
    ///
    /// # Errors
    /// - Returns `ConfigError::InvalidValue` when a variable is set but not
    ///   valid unicode.
    /// - Returns `ConfigError::InvalidValue` when the timeout is not a
    ///   non-negative integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name))
    }

    /// Same parsing as [`StoreConfig::from_env`] against an arbitrary lookup
    /// with the contract of `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let location = match read_var(&lookup, DB_PATH_VAR)? {
            Some(raw) => parse_location(&raw),
            None => DbLocation::Memory,
        };

        let busy_timeout = match read_var(&lookup, BUSY_TIMEOUT_VAR)? {
            Some(raw) if !raw.trim().is_empty() => parse_timeout_ms(&raw)?,
            _ => DEFAULT_BUSY_TIMEOUT,
        };

        Ok(Self {
            location,
            busy_timeout,
        })
    }
}

// Only an unset variable counts as absent.
fn read_var<F>(lookup: &F, name: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(name) {
        Ok(raw) => Ok(Some(raw)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(ConfigError::InvalidValue {
            name,
            value: raw.to_string_lossy().into_owned(),
            reason: "not valid unicode".to_string(),
        }),
    }
}

fn parse_location(raw: &str) -> DbLocation {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == MEMORY_PATH_SENTINEL {
        DbLocation::Memory
    } else {
        DbLocation::File(PathBuf::from(trimmed))
    }
}

fn parse_timeout_ms(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|err| ConfigError::InvalidValue {
            name: BUSY_TIMEOUT_VAR,
            value: raw.to_string(),
            reason: err.to_string(),
        })
}
