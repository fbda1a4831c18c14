//! User registration with password policy and hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use store::{Cart, Store, User};

use crate::error::DomainError;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 7;

/// Service for registering users.
pub struct UserService<S: Store> {
    store: S,
}

impl<S: Store> UserService<S> {
    /// Creates a new user service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers a new user together with their empty cart.
    ///
    /// The password is validated (length, confirmation) and stored only
    /// as an Argon2id hash. A taken username surfaces as
    /// [`store::StoreError::Conflict`].
    #[tracing::instrument(skip(self, password, confirm_password))]
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User, DomainError> {
        validate_password(password, confirm_password)?;

        let password_hash = hash_password(password)?;
        let user = User::new(username, password_hash);
        let cart = Cart::new(user.id);

        let user = self.store.create_user(user, cart).await?;
        metrics::counter!("users_registered_total").increment(1);
        tracing::info!(%username, "user registered");
        Ok(user)
    }
}

fn validate_password(password: &str, confirm_password: &str) -> Result<(), DomainError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    if password != confirm_password {
        return Err(DomainError::Validation(
            "password confirmation does not match".to_string(),
        ));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| DomainError::PasswordHash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{InMemoryStore, StoreError};

    #[tokio::test]
    async fn register_happy_path() {
        let store = InMemoryStore::new();
        let service = UserService::new(store.clone());

        let user = service
            .register("alice", "testPassword", "testPassword")
            .await
            .unwrap();

        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "testPassword");
        assert!(user.password_hash.starts_with("$argon2id$"));

        // The cart exists from the moment the user does.
        let cart = store.cart_for_user(user.id).await.unwrap().unwrap();
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let store = InMemoryStore::new();
        let service = UserService::new(store.clone());

        let result = service.register("alice", "short", "short").await;
        assert!(matches!(result, Err(DomainError::Validation(_))));

        // Nothing was persisted.
        assert!(store.find_user_by_username("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn seven_characters_is_enough() {
        let store = InMemoryStore::new();
        let service = UserService::new(store);

        let result = service.register("alice", "1234567", "1234567").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn mismatched_confirmation_is_rejected() {
        let store = InMemoryStore::new();
        let service = UserService::new(store);

        let result = service
            .register("alice", "testPassword", "differentPassword")
            .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let store = InMemoryStore::new();
        let service = UserService::new(store);

        service
            .register("alice", "testPassword", "testPassword")
            .await
            .unwrap();

        let result = service
            .register("alice", "otherPassword", "otherPassword")
            .await;
        assert!(matches!(
            result,
            Err(DomainError::Store(StoreError::Conflict(_)))
        ));
    }

    #[tokio::test]
    async fn hashes_are_salted_per_user() {
        let store = InMemoryStore::new();
        let service = UserService::new(store);

        let a = service
            .register("alice", "testPassword", "testPassword")
            .await
            .unwrap();
        let b = service
            .register("bob", "testPassword", "testPassword")
            .await
            .unwrap();

        assert_ne!(a.password_hash, b.password_hash);
    }
}
