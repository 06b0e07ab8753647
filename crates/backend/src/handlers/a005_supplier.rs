use axum::{extract::Path, Json};
use contracts::domain::a005_supplier::aggregate::{Supplier, SupplierDto};
use serde_json::json;

use crate::domain::a005_supplier;
use crate::shared::error::{parse_uuid, ServiceResult};

/// GET /api/supplier
pub async fn list_all() -> ServiceResult<Json<Vec<Supplier>>> {
    Ok(Json(a005_supplier::service::list_all().await?))
}

/// GET /api/supplier/:id
pub async fn get_by_id(Path(id): Path<String>) -> ServiceResult<Json<Supplier>> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a005_supplier::service::get_by_id(uuid).await?))
}

/// POST /api/supplier
pub async fn upsert(Json(dto): Json<SupplierDto>) -> ServiceResult<Json<serde_json::Value>> {
    let id = match dto.id.clone().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            a005_supplier::service::update(dto).await?;
            id
        }
        None => a005_supplier::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({"id": id})))
}

/// DELETE /api/supplier/:id
pub async fn delete(Path(id): Path<String>) -> ServiceResult<()> {
    let uuid = parse_uuid(&id)?;
    a005_supplier::service::delete(uuid).await
}
