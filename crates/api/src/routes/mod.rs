//! Route handlers, grouped per resource.

pub mod cart;
pub mod health;
pub mod items;
pub mod metrics;
pub mod orders;
pub mod users;

use crate::error::ApiError;

/// Parses a path segment as a UUID, mapping failures to a 400.
pub(crate) fn parse_uuid(id: &str) -> Result<uuid::Uuid, ApiError> {
    uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))
}
