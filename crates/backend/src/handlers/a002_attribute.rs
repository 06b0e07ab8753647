use axum::{extract::Path, Json};
use contracts::domain::a002_attribute::aggregate::{Attribute, AttributeDto};
use serde_json::json;

use crate::domain::a002_attribute;
use crate::shared::error::{parse_uuid, ServiceResult};

/// GET /api/attribute
pub async fn list_all() -> ServiceResult<Json<Vec<Attribute>>> {
    Ok(Json(a002_attribute::service::list_all().await?))
}

/// GET /api/attribute/:id
pub async fn get_by_id(Path(id): Path<String>) -> ServiceResult<Json<Attribute>> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a002_attribute::service::get_by_id(uuid).await?))
}

/// POST /api/attribute
pub async fn upsert(Json(dto): Json<AttributeDto>) -> ServiceResult<Json<serde_json::Value>> {
    let id = match dto.id.clone().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            a002_attribute::service::update(dto).await?;
            id
        }
        None => a002_attribute::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({"id": id})))
}

/// DELETE /api/attribute/:id
pub async fn delete(Path(id): Path<String>) -> ServiceResult<()> {
    let uuid = parse_uuid(&id)?;
    a002_attribute::service::delete(uuid).await
}
