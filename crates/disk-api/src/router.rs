//! Route definitions for the Disk HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use std::time::Duration;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(unit_routes())
        .merge(history_routes())
        .route("/health", get(handlers::health::health))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Import, delete and node lookup
fn unit_routes() -> Router<AppState> {
    Router::new()
        .route("/imports", post(handlers::imports::import_batch))
        .route("/delete/{id}", delete(handlers::nodes::delete_node))
        .route("/nodes/{id}", get(handlers::nodes::get_node))
}

/// Updates feed and per-node history
fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/updates", get(handlers::history::updates))
        .route("/node/{id}/history", get(handlers::history::node_history))
}
