//! Unit table queries.

use chrono::{DateTime, Utc};
use sqlx::PgConnection;

use disk_core::result::AppResult;
use disk_core::types::UnitId;
use disk_entity::unit::Unit;

use crate::error::db_error;

const UNIT_COLUMNS: &str = "id, kind, url, parent_id, size, modified_at";

/// Find a unit by ID.
pub async fn find_by_id(conn: &mut PgConnection, id: &UnitId) -> AppResult<Option<Unit>> {
    sqlx::query_as::<_, Unit>(&format!("SELECT {UNIT_COLUMNS} FROM units WHERE id = $1"))
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(|e| db_error("Failed to find unit", e))
}

/// List direct children of a unit.
pub async fn find_children(conn: &mut PgConnection, parent_id: &UnitId) -> AppResult<Vec<Unit>> {
    sqlx::query_as::<_, Unit>(&format!(
        "SELECT {UNIT_COLUMNS} FROM units WHERE parent_id = $1 ORDER BY id ASC"
    ))
    .bind(parent_id)
    .fetch_all(conn)
    .await
    .map_err(|e| db_error("Failed to list children", e))
}

/// Insert a unit or overwrite every column of an existing one.
pub async fn upsert(conn: &mut PgConnection, unit: &Unit) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO units (id, kind, url, parent_id, size, modified_at) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (id) DO UPDATE SET \
            kind = EXCLUDED.kind, \
            url = EXCLUDED.url, \
            parent_id = EXCLUDED.parent_id, \
            size = EXCLUDED.size, \
            modified_at = EXCLUDED.modified_at",
    )
    .bind(&unit.id)
    .bind(unit.kind)
    .bind(&unit.url)
    .bind(&unit.parent_id)
    .bind(unit.size)
    .bind(unit.modified_at)
    .execute(conn)
    .await
    .map_err(|e| db_error("Failed to save unit", e))?;
    Ok(())
}

/// Delete a single unit row. Returns `true` if a row was removed.
pub async fn delete(conn: &mut PgConnection, id: &UnitId) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM units WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await
        .map_err(|e| db_error("Failed to delete unit", e))?;
    Ok(result.rows_affected() > 0)
}

/// Files whose `modified_at` lies in `[from, to]`.
pub async fn find_files_modified_between(
    conn: &mut PgConnection,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> AppResult<Vec<Unit>> {
    sqlx::query_as::<_, Unit>(&format!(
        "SELECT {UNIT_COLUMNS} FROM units \
         WHERE kind = 'FILE' AND modified_at >= $1 AND modified_at <= $2 \
         ORDER BY modified_at ASC, id ASC"
    ))
    .bind(from)
    .bind(to)
    .fetch_all(conn)
    .await
    .map_err(|e| db_error("Failed to list updated files", e))
}
