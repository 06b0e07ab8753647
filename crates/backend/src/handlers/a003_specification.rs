use axum::{extract::Path, Json};
use contracts::domain::a003_specification::aggregate::{Specification, SpecificationDto};
use serde_json::json;

use crate::domain::a003_specification;
use crate::shared::error::{parse_uuid, ServiceResult};

/// GET /api/specification
pub async fn list_all() -> ServiceResult<Json<Vec<Specification>>> {
    Ok(Json(a003_specification::service::list_all().await?))
}

/// GET /api/specification/:id
pub async fn get_by_id(Path(id): Path<String>) -> ServiceResult<Json<Specification>> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a003_specification::service::get_by_id(uuid).await?))
}

/// POST /api/specification
pub async fn upsert(Json(dto): Json<SpecificationDto>) -> ServiceResult<Json<serde_json::Value>> {
    let id = match dto.id.clone().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            a003_specification::service::update(dto).await?;
            id
        }
        None => a003_specification::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({"id": id})))
}

/// DELETE /api/specification/:id
pub async fn delete(Path(id): Path<String>) -> ServiceResult<()> {
    let uuid = parse_uuid(&id)?;
    a003_specification::service::delete(uuid).await
}
