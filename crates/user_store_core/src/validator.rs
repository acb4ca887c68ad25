//! Argument preconditions for user operations.
//!
//! # Responsibility
//! - Reject absent or malformed caller input before it reaches storage.
//!
//! # Invariants
//! - Validators are pure: no I/O, no shared state.
//! - A successful validation returns the unwrapped value for the caller to use.

use crate::model::user::UserId;
use thiserror::Error;

/// Rejected caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("User id cannot be null")]
    NullId,
    #[error("User name cannot be null")]
    NullName,
    #[error("User name cannot be empty")]
    BlankName,
    #[error("User age cannot be null")]
    NullAge,
    #[error("User age cannot be negative")]
    NegativeAge(i32),
}

/// Requires an id to be present.
pub fn validate_id(id: Option<UserId>) -> Result<UserId, ValidationError> {
    id.ok_or(ValidationError::NullId)
}

/// Requires a name that is present and not blank after trimming.
///
/// Blank means only Unicode `White_Space` characters, so a name made of
/// no-break spaces (U+00A0, U+202F) is rejected too.
///
/// The returned slice is the caller's original text; it is not trimmed.
pub fn validate_name(name: Option<&str>) -> Result<&str, ValidationError> {
    let name = name.ok_or(ValidationError::NullName)?;
    if name.trim().is_empty() {
        return Err(ValidationError::BlankName);
    }
    Ok(name)
}

/// Requires an age that is present and non-negative.
pub fn validate_age(age: Option<i32>) -> Result<i32, ValidationError> {
    match age {
        None => Err(ValidationError::NullAge),
        Some(value) if value < 0 => Err(ValidationError::NegativeAge(value)),
        Some(value) => Ok(value),
    }
}
