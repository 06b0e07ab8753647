use axum::{extract::Path, Json};
use contracts::domain::a007_warehouse::aggregate::{Warehouse, WarehouseDto};
use serde_json::json;

use crate::domain::a007_warehouse;
use crate::shared::error::{parse_uuid, ServiceResult};

/// GET /api/warehouse
pub async fn list_all() -> ServiceResult<Json<Vec<Warehouse>>> {
    Ok(Json(a007_warehouse::service::list_all().await?))
}

/// GET /api/warehouse/:id
pub async fn get_by_id(Path(id): Path<String>) -> ServiceResult<Json<Warehouse>> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a007_warehouse::service::get_by_id(uuid).await?))
}

/// POST /api/warehouse
pub async fn upsert(Json(dto): Json<WarehouseDto>) -> ServiceResult<Json<serde_json::Value>> {
    let id = match dto.id.clone().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            a007_warehouse::service::update(dto).await?;
            id
        }
        None => a007_warehouse::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({"id": id})))
}

/// DELETE /api/warehouse/:id
pub async fn delete(Path(id): Path<String>) -> ServiceResult<()> {
    let uuid = parse_uuid(&id)?;
    a007_warehouse::service::delete(uuid).await
}
