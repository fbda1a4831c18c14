use thiserror::Error;

/// Errors that can occur when interacting with the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated (e.g. a duplicate username).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Persisted data violated an invariant the store is expected to
    /// uphold (e.g. a user row without its cart row).
    #[error("Data corruption: {0}")]
    DataCorruption(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
