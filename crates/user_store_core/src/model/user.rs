//! User domain model.
//!
//! # Responsibility
//! - Define the canonical user record persisted in the `users` table.
//!
//! # Invariants
//! - `id` is assigned by storage and never changes for the record lifetime.
//! - `name` is non-blank for every persisted user.
//! - `age`, when present, is non-negative.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned identifier of a user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Returns the raw integer key.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// One row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Optional in memory so partially constructed records can be modelled.
    /// The schema itself declares the column `NOT NULL`.
    pub age: Option<i32>,
}

impl User {
    /// Creates a user record with a known age.
    pub fn new(id: UserId, name: impl Into<String>, age: i32) -> Self {
        Self {
            id,
            name: name.into(),
            age: Some(age),
        }
    }

    /// Creates a user record whose age has not been specified.
    pub fn without_age(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            age: None,
        }
    }
}
