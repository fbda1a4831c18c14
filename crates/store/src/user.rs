//! User entity.

use common::UserId;

/// A registered user.
///
/// The password is stored only as a one-way hash (an Argon2id PHC
/// string); plaintext never reaches the store. Every user owns exactly
/// one cart, created alongside the user at registration time and looked
/// up through [`crate::Store::cart_for_user`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    /// Unique across all users.
    pub username: String,
    pub password_hash: String,
}

impl User {
    /// Creates a new user with a fresh ID.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}
