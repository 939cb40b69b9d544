//! Node lookup and delete handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use disk_core::types::UnitId;

use crate::dto::request::DateQuery;
use crate::dto::response::NodeResponse;
use crate::error::ApiError;
use crate::extractors::ApiQuery;
use crate::state::AppState;

/// GET /nodes/{id}
pub async fn get_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NodeResponse>, ApiError> {
    let node = state.nodes.get_node(&UnitId::new(id)).await?;
    Ok(Json(NodeResponse::from(node)))
}

/// DELETE /delete/{id}?date=...
pub async fn delete_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<StatusCode, ApiError> {
    let timestamp = query.timestamp()?;
    state
        .engine
        .delete_unit(&UnitId::new(id), timestamp)
        .await?;
    Ok(StatusCode::OK)
}
