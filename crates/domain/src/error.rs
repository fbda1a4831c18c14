//! Domain error types.

use common::ItemId;
use store::StoreError;
use thiserror::Error;

/// Errors that can occur during domain operations.
///
/// Not-found conditions are surfaced distinctly from success so the
/// transport layer can pick the response; store failures propagate
/// unchanged rather than being reinterpreted, and nothing is retried
/// here.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No user with the given username exists.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// No catalog item with the given id exists.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// The input failed a domain validation rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The password could not be hashed.
    #[error("Password hashing failed")]
    PasswordHash,

    /// An error occurred in the store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
