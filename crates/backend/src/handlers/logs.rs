use axum::Json;
use contracts::shared::logger::{CreateLogRequest, LogEntry};
use serde_json::json;

use crate::shared::error::{ServiceError, ServiceResult};
use crate::shared::logger;

/// GET /api/logs
pub async fn list_all() -> ServiceResult<Json<Vec<LogEntry>>> {
    Ok(Json(logger::repository::get_all_logs().await?))
}

/// POST /api/logs
pub async fn create(Json(req): Json<CreateLogRequest>) -> ServiceResult<()> {
    if req.message.trim().is_empty() {
        return Err(ServiceError::BadRequest("Log message is empty".into()));
    }
    logger::repository::log_event(
        crate::shared::data::db::get_connection(),
        &req.source,
        &req.category,
        &req.message,
    )
    .await?;
    Ok(())
}

/// DELETE /api/logs
pub async fn clear_all() -> ServiceResult<Json<serde_json::Value>> {
    let removed = logger::repository::clear_all_logs().await?;
    tracing::info!("System log cleared: {} entries", removed);
    Ok(Json(json!({"removed": removed})))
}
