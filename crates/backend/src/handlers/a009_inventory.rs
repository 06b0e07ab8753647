use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::a009_inventory::aggregate::{
    InventoryFilter, InventoryRecord, InventoryRecordDto,
};
use serde_json::json;

use crate::domain::a009_inventory;
use crate::shared::error::ServiceResult;

/// GET /api/inventory?product_id=&warehouse_id=
pub async fn list(Query(filter): Query<InventoryFilter>) -> ServiceResult<Json<Vec<InventoryRecord>>> {
    Ok(Json(a009_inventory::service::list(filter).await?))
}

/// GET /api/inventory/:id
pub async fn get_by_id(Path(id): Path<String>) -> ServiceResult<Json<InventoryRecord>> {
    Ok(Json(a009_inventory::service::get_by_id(&id).await?))
}

/// POST /api/inventory
pub async fn upsert(Json(dto): Json<InventoryRecordDto>) -> ServiceResult<Json<serde_json::Value>> {
    let id = a009_inventory::service::upsert(dto).await?;
    Ok(Json(json!({"id": id})))
}

/// DELETE /api/inventory/:id
pub async fn delete(Path(id): Path<String>) -> ServiceResult<()> {
    a009_inventory::service::delete(&id).await
}
