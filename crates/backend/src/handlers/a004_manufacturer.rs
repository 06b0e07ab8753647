use axum::{extract::Path, Json};
use contracts::domain::a004_manufacturer::aggregate::{Manufacturer, ManufacturerDto};
use serde_json::json;

use crate::domain::a004_manufacturer;
use crate::shared::error::{parse_uuid, ServiceResult};

/// GET /api/manufacturer
pub async fn list_all() -> ServiceResult<Json<Vec<Manufacturer>>> {
    Ok(Json(a004_manufacturer::service::list_all().await?))
}

/// GET /api/manufacturer/:id
pub async fn get_by_id(Path(id): Path<String>) -> ServiceResult<Json<Manufacturer>> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a004_manufacturer::service::get_by_id(uuid).await?))
}

/// POST /api/manufacturer
pub async fn upsert(Json(dto): Json<ManufacturerDto>) -> ServiceResult<Json<serde_json::Value>> {
    let id = match dto.id.clone().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            a004_manufacturer::service::update(dto).await?;
            id
        }
        None => a004_manufacturer::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({"id": id})))
}

/// DELETE /api/manufacturer/:id
pub async fn delete(Path(id): Path<String>) -> ServiceResult<()> {
    let uuid = parse_uuid(&id)?;
    a004_manufacturer::service::delete(uuid).await
}
