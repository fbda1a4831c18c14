//! Order submission and history endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use store::{Store, UserOrder};

use crate::AppState;
use crate::error::ApiError;
use crate::routes::items::{ItemResponse, item_response};

// -- Response types --

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub user_id: String,
    pub items: Vec<ItemResponse>,
    pub total_cents: i64,
    pub placed_at: String,
}

fn order_response(order: &UserOrder) -> OrderResponse {
    OrderResponse {
        id: order.id.to_string(),
        user_id: order.user_id.to_string(),
        items: order.items.iter().map(item_response).collect(),
        total_cents: order.total.cents(),
        placed_at: order.placed_at.to_rfc3339(),
    }
}

// -- Handlers --

/// POST /orders/submit/{username} — snapshot the user's cart as an order.
#[tracing::instrument(skip(state))]
pub async fn submit<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(username): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.order_service.submit(&username).await?;
    Ok(Json(order_response(&order)))
}

/// GET /orders/history/{username} — all orders the user has placed,
/// oldest first. An empty history is a 200, not a 404.
#[tracing::instrument(skip(state))]
pub async fn history<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(username): Path<String>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.order_service.history(&username).await?;
    Ok(Json(orders.iter().map(order_response).collect()))
}
