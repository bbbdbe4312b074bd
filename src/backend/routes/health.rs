use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;

/// GET /health
///
/// `200 {"status":"ok","database":"ok"}` while the database answers, 500
/// otherwise.
pub async fn health(State(pool): State<SqlitePool>) -> Result<Json<Value>, BackendError> {
    sqlx::query("SELECT 1").execute(&pool).await?;
    Ok(Json(json!({ "status": "ok", "database": "ok" })))
}
