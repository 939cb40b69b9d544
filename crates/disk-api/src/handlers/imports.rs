//! Batch import handler.

use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::ImportRequest;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /imports
pub async fn import_batch(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ImportRequest>,
) -> Result<StatusCode, ApiError> {
    let (records, timestamp) = req.into_batch()?;
    state.engine.import_batch(records, timestamp).await?;
    Ok(StatusCode::OK)
}
