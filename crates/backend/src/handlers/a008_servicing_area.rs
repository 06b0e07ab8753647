use axum::{extract::Path, Json};
use contracts::domain::a008_servicing_area::aggregate::{ServicingArea, ServicingAreaDto};
use serde_json::json;

use crate::domain::a008_servicing_area;
use crate::shared::error::{parse_uuid, ServiceResult};

/// GET /api/servicing_area
pub async fn list_all() -> ServiceResult<Json<Vec<ServicingArea>>> {
    Ok(Json(a008_servicing_area::service::list_all().await?))
}

/// GET /api/servicing_area/:id
pub async fn get_by_id(Path(id): Path<String>) -> ServiceResult<Json<ServicingArea>> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a008_servicing_area::service::get_by_id(uuid).await?))
}

/// POST /api/servicing_area
pub async fn upsert(Json(dto): Json<ServicingAreaDto>) -> ServiceResult<Json<serde_json::Value>> {
    let id = match dto.id.clone().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            a008_servicing_area::service::update(dto).await?;
            id
        }
        None => a008_servicing_area::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({"id": id})))
}

/// DELETE /api/servicing_area/:id
pub async fn delete(Path(id): Path<String>) -> ServiceResult<()> {
    let uuid = parse_uuid(&id)?;
    a008_servicing_area::service::delete(uuid).await
}
