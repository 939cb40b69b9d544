//! Custom Axum extractors.

pub mod json;
pub mod query;

pub use json::ValidatedJson;
pub use query::ApiQuery;
