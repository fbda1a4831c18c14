//! Cart modification endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use domain::CartOperation;
use serde::{Deserialize, Serialize};
use store::{Cart, ItemId, Store};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::routes::items::{ItemResponse, item_response};

// -- Request types --

#[derive(Deserialize)]
pub struct ModifyCartRequest {
    pub username: String,
    pub item_id: Uuid,
    /// Number of units to add or remove; zero is a legal no-op.
    pub quantity: u32,
}

// -- Response types --

#[derive(Serialize)]
pub struct CartResponse {
    pub id: String,
    pub items: Vec<ItemResponse>,
    pub total_cents: i64,
}

fn cart_response(cart: &Cart) -> CartResponse {
    CartResponse {
        id: cart.id.to_string(),
        items: cart.items.iter().map(item_response).collect(),
        total_cents: cart.total().cents(),
    }
}

// -- Handlers --

/// POST /cart/add — add units of an item to the user's cart.
#[tracing::instrument(skip(state, req))]
pub async fn add<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<ModifyCartRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = state
        .cart_service
        .modify(
            &req.username,
            ItemId::from_uuid(req.item_id),
            req.quantity,
            CartOperation::Add,
        )
        .await?;

    Ok(Json(cart_response(&cart)))
}

/// POST /cart/remove — remove units of an item from the user's cart.
#[tracing::instrument(skip(state, req))]
pub async fn remove<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<ModifyCartRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = state
        .cart_service
        .modify(
            &req.username,
            ItemId::from_uuid(req.item_id),
            req.quantity,
            CartOperation::Remove,
        )
        .await?;

    Ok(Json(cart_response(&cart)))
}
