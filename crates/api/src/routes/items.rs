//! Catalog item lookup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use store::{Item, ItemId, Store};

use crate::AppState;
use crate::error::ApiError;
use crate::routes::parse_uuid;

// -- Response types --

#[derive(Serialize)]
pub struct ItemResponse {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    pub description: String,
}

pub(crate) fn item_response(item: &Item) -> ItemResponse {
    ItemResponse {
        id: item.id.to_string(),
        name: item.name.clone(),
        price_cents: item.price.cents(),
        description: item.description.clone(),
    }
}

// -- Handlers --

/// GET /items — the full catalog.
#[tracing::instrument(skip(state))]
pub async fn list<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let items = state.store.list_items().await?;
    Ok(Json(items.iter().map(item_response).collect()))
}

/// GET /items/{id} — look up an item by id.
#[tracing::instrument(skip(state))]
pub async fn get<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item_id = ItemId::from_uuid(parse_uuid(&id)?);

    let item = state
        .store
        .find_item_by_id(item_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Item {id} not found")))?;

    Ok(Json(item_response(&item)))
}

/// GET /items/by-name/{name} — items with exactly the given name.
///
/// An empty result reports not-found rather than an empty list.
#[tracing::instrument(skip(state))]
pub async fn get_by_name<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let items = state.store.find_items_by_name(&name).await?;

    if items.is_empty() {
        return Err(ApiError::NotFound(format!("No items named {name}")));
    }

    Ok(Json(items.iter().map(item_response).collect()))
}
