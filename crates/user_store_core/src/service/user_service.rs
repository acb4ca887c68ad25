//! User use-case service.
//!
//! # Responsibility
//! - Validate caller input before any storage access.
//! - Delegate persistence to repository implementations.
//! - Classify users as adult or minor.
//!
//! # Invariants
//! - Invalid input never reaches the repository (fail fast, no partial writes).
//! - `find_user_by_id` reports absence as `Ok(None)`; `update_user` and
//!   `is_adult_user` report it as `ServiceError::NotFound`.
//! - Errors are returned unchanged; nothing is retried.

use crate::model::user::{User, UserId};
use crate::repo::user_repo::{RepoError, UserRepository};
use crate::validator::{validate_age, validate_id, validate_name, ValidationError};
use log::{debug, warn};
use thiserror::Error;

/// Minimum age at which a user counts as an adult.
pub const LEGAL_AGE: i32 = 18;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Coarse classification of a `ServiceError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    StorageFailure,
    InvalidState,
}

/// Service error for user use-cases.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller input failed validation; storage was not touched.
    #[error(transparent)]
    InvalidArgument(#[from] ValidationError),
    /// Target user does not exist.
    #[error("User with id {0} not found")]
    NotFound(UserId),
    /// Persistence-layer failure.
    #[error(transparent)]
    Storage(RepoError),
    /// Stored data is inconsistent with the requested operation.
    #[error("{0}")]
    InvalidState(&'static str),
}

impl ServiceError {
    /// Returns the error kind so callers can branch without matching payloads.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::StorageFailure,
            Self::InvalidState(_) => ErrorKind::InvalidState,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

/// Use-case service wrapper for user CRUD operations.
///
/// Inputs are `Option`s: this is the boundary where caller data is untrusted.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates name and age, then stores a new user.
    ///
    /// Returns the storage-assigned id.
    pub fn save_user(&self, name: Option<&str>, age: Option<i32>) -> ServiceResult<UserId> {
        let (name, age) = rejecting("save", || Ok((validate_name(name)?, validate_age(age)?)))?;
        Ok(self.repo.create(name, Some(age))?)
    }

    /// Lists every stored user.
    pub fn find_all_users(&self) -> ServiceResult<Vec<User>> {
        Ok(self.repo.find_all()?)
    }

    /// Looks up one user; absence is `Ok(None)`.
    pub fn find_user_by_id(&self, id: Option<UserId>) -> ServiceResult<Option<User>> {
        let id = rejecting("find_by_id", || validate_id(id))?;
        Ok(self.repo.find_by_id(id)?)
    }

    /// Replaces name and age of an existing user.
    ///
    /// # Errors
    /// - `ServiceError::NotFound` when no user has `id`.
    pub fn update_user(
        &self,
        id: Option<UserId>,
        name: Option<&str>,
        age: Option<i32>,
    ) -> ServiceResult<()> {
        let (id, name, age) = rejecting("update", || {
            Ok((validate_id(id)?, validate_name(name)?, validate_age(age)?))
        })?;
        Ok(self.repo.update(id, name, Some(age))?)
    }

    /// Deletes a user.
    ///
    /// A missing user yields `ErrorKind::StorageFailure`, not `NotFound`.
    pub fn delete_user(&self, id: Option<UserId>) -> ServiceResult<()> {
        let id = rejecting("delete", || validate_id(id))?;
        Ok(self.repo.delete(id)?)
    }

    /// Returns whether the user is at least [`LEGAL_AGE`] years old.
    ///
    /// # Errors
    /// - `ServiceError::NotFound` when no user has `id`.
    /// - `ServiceError::InvalidState` when the stored user has no age.
    pub fn is_adult_user(&self, id: Option<UserId>) -> ServiceResult<bool> {
        let id = rejecting("is_adult", || validate_id(id))?;
        let user = self
            .repo
            .find_by_id(id)?
            .ok_or(ServiceError::NotFound(id))?;

        let age = user
            .age
            .ok_or(ServiceError::InvalidState("User age is not specified"))?;

        let adult = age >= LEGAL_AGE;
        debug!("event=user_is_adult module=service status=ok id={id} adult={adult}");
        Ok(adult)
    }
}

fn rejecting<T>(
    op: &'static str,
    validate: impl FnOnce() -> Result<T, ValidationError>,
) -> ServiceResult<T> {
    validate().map_err(|err| {
        warn!("event=user_validation module=service status=rejected op={op} reason=\"{err}\"");
        ServiceError::InvalidArgument(err)
    })
}
