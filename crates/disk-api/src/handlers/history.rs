//! Updates feed and node history handlers.

use axum::Json;
use axum::extract::{Path, State};

use disk_core::types::UnitId;

use crate::dto::request::{DateQuery, HistoryQuery};
use crate::dto::response::{ItemsResponse, UnitItem};
use crate::error::ApiError;
use crate::extractors::ApiQuery;
use crate::state::AppState;

/// GET /updates?date=...
pub async fn updates(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<Json<ItemsResponse<UnitItem>>, ApiError> {
    let as_of = query.timestamp()?;
    let files = state.history.recent_file_changes(as_of).await?;
    Ok(Json(ItemsResponse::new(
        files.into_iter().map(UnitItem::from).collect(),
    )))
}

/// GET /node/{id}/history?dateStart=...&dateEnd=...
pub async fn node_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<HistoryQuery>,
) -> Result<Json<ItemsResponse<UnitItem>>, ApiError> {
    let (start, end) = query.bounds()?;
    let records = state
        .history
        .node_history(&UnitId::new(id), start, end)
        .await?;
    Ok(Json(ItemsResponse::new(
        records.into_iter().map(UnitItem::from).collect(),
    )))
}
