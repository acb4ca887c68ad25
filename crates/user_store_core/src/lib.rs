//! Core domain logic for the user store.
//! This crate is the single source of truth for user record invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validator;

pub use config::{ConfigError, DbLocation, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::user::{User, UserId};
pub use repo::user_repo::{RepoError, RepoResult, SqliteUserRepository, UserRepository};
pub use service::user_service::{ErrorKind, ServiceError, ServiceResult, UserService, LEGAL_AGE};
pub use validator::{validate_age, validate_id, validate_name, ValidationError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
