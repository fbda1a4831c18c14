//! HTTP API server for the shopcart backend.
//!
//! Provides REST endpoints for users, catalog items, carts, and orders,
//! with structured logging (tracing) and Prometheus metrics. Handlers
//! are generic over the [`store::Store`] implementation, so the same
//! router runs against the in-memory store (tests, local development)
//! and PostgreSQL (deployments).

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use domain::{CartService, OrderService, UserService};
use metrics_exporter_prometheus::PrometheusHandle;
use store::Store;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState<S: Store> {
    pub user_service: UserService<S>,
    pub cart_service: CartService<S>,
    pub order_service: OrderService<S>,
    /// Direct store handle for plain lookups that have no service logic.
    pub store: S,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: Store + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/users", post(routes::users::create::<S>))
        .route("/users/{id}", get(routes::users::get::<S>))
        .route(
            "/users/by-username/{username}",
            get(routes::users::get_by_username::<S>),
        )
        .route("/items", get(routes::items::list::<S>))
        .route("/items/{id}", get(routes::items::get::<S>))
        .route("/items/by-name/{name}", get(routes::items::get_by_name::<S>))
        .route("/cart/add", post(routes::cart::add::<S>))
        .route("/cart/remove", post(routes::cart::remove::<S>))
        .route("/orders/submit/{username}", post(routes::orders::submit::<S>))
        .route(
            "/orders/history/{username}",
            get(routes::orders::history::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state from a store.
pub fn create_default_state<S: Store + Clone + 'static>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState {
        user_service: UserService::new(store.clone()),
        cart_service: CartService::new(store.clone()),
        order_service: OrderService::new(store.clone()),
        store,
    })
}
