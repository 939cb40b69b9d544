//! History table queries.

use sqlx::PgConnection;

use disk_core::result::AppResult;
use disk_core::types::UnitId;
use disk_entity::history::{HistoryRange, HistoryRecord, UnitSnapshot};

use crate::error::db_error;

const HISTORY_COLUMNS: &str = "seq, unit_id, kind, url, parent_id, size, recorded_at";

/// Append a snapshot and return the stored record.
pub async fn append(conn: &mut PgConnection, snapshot: &UnitSnapshot) -> AppResult<HistoryRecord> {
    sqlx::query_as::<_, HistoryRecord>(&format!(
        "INSERT INTO unit_history (unit_id, kind, url, parent_id, size, recorded_at) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING {HISTORY_COLUMNS}"
    ))
    .bind(&snapshot.unit_id)
    .bind(snapshot.kind)
    .bind(&snapshot.url)
    .bind(&snapshot.parent_id)
    .bind(snapshot.size)
    .bind(snapshot.recorded_at)
    .fetch_one(conn)
    .await
    .map_err(|e| db_error("Failed to append history", e))
}

/// The most recently appended record for a unit.
pub async fn find_latest(
    conn: &mut PgConnection,
    unit_id: &UnitId,
) -> AppResult<Option<HistoryRecord>> {
    sqlx::query_as::<_, HistoryRecord>(&format!(
        "SELECT {HISTORY_COLUMNS} FROM unit_history WHERE unit_id = $1 \
         ORDER BY seq DESC LIMIT 1"
    ))
    .bind(unit_id)
    .fetch_optional(conn)
    .await
    .map_err(|e| db_error("Failed to find latest history", e))
}

/// History of a unit in chronological order, filtered by range.
pub async fn find_by_unit(
    conn: &mut PgConnection,
    unit_id: &UnitId,
    range: HistoryRange,
) -> AppResult<Vec<HistoryRecord>> {
    let result = match range {
        HistoryRange::All => {
            sqlx::query_as::<_, HistoryRecord>(&format!(
                "SELECT {HISTORY_COLUMNS} FROM unit_history WHERE unit_id = $1 \
                 ORDER BY recorded_at ASC, seq ASC"
            ))
            .bind(unit_id)
            .fetch_all(conn)
            .await
        }
        HistoryRange::Between { start, end } => {
            sqlx::query_as::<_, HistoryRecord>(&format!(
                "SELECT {HISTORY_COLUMNS} FROM unit_history WHERE unit_id = $1 \
                 AND recorded_at >= $2 AND recorded_at < $3 \
                 ORDER BY recorded_at ASC, seq ASC"
            ))
            .bind(unit_id)
            .bind(start)
            .bind(end)
            .fetch_all(conn)
            .await
        }
    };
    result.map_err(|e| db_error("Failed to list history", e))
}

/// Delete every history record of a unit. Returns the number removed.
pub async fn delete_by_unit(conn: &mut PgConnection, unit_id: &UnitId) -> AppResult<u64> {
    let result = sqlx::query("DELETE FROM unit_history WHERE unit_id = $1")
        .bind(unit_id)
        .execute(conn)
        .await
        .map_err(|e| db_error("Failed to purge history", e))?;
    Ok(result.rows_affected())
}
