//! User registration and lookup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use store::{Store, User, UserId};

use crate::AppState;
use crate::error::ApiError;
use crate::routes::parse_uuid;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

// -- Response types --

/// A user as seen over the wire. The password hash never leaves the
/// server.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
}

fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        username: user.username,
    }
}

// -- Handlers --

/// POST /users — register a new user (and their empty cart).
#[tracing::instrument(skip(state, req))]
pub async fn create<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(axum::http::StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .user_service
        .register(&req.username, &req.password, &req.confirm_password)
        .await?;

    Ok((axum::http::StatusCode::CREATED, Json(user_response(user))))
}

/// GET /users/{id} — look up a user by id.
#[tracing::instrument(skip(state))]
pub async fn get<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user_id = UserId::from_uuid(parse_uuid(&id)?);

    let user = state
        .store
        .find_user_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {id} not found")))?;

    Ok(Json(user_response(user)))
}

/// GET /users/by-username/{username} — look up a user by username.
#[tracing::instrument(skip(state))]
pub async fn get_by_username<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .store
        .find_user_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {username} not found")))?;

    Ok(Json(user_response(user)))
}
