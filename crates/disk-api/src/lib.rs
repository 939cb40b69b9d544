//! # disk-api
//!
//! HTTP API layer for Disk built on Axum.
//!
//! Provides the import, delete, node, updates and history endpoints,
//! middleware (CORS, request logging, timeouts), extractors, DTOs, and the
//! mapping of domain errors to the `{code, message}` response body.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::run_server;
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
