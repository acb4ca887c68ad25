//! Domain model for persisted user records.
//!
//! # Responsibility
//! - Define the record shape shared by repository and service layers.
//!
//! # Invariants
//! - Every `User` handed out by the repository carries a storage-assigned id.

pub mod user;
