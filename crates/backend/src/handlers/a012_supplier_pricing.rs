use axum::{extract::Path, Json};
use contracts::domain::a012_supplier_pricing::aggregate::{SupplierPricing, SupplierPricingDto};
use contracts::shared::pricing::AffectedProduct;
use serde_json::json;

use crate::domain::a012_supplier_pricing;
use crate::shared::error::{parse_uuid, ServiceResult};

/// GET /api/supplier_pricing
pub async fn list_all() -> ServiceResult<Json<Vec<SupplierPricing>>> {
    Ok(Json(a012_supplier_pricing::service::list_all().await?))
}

/// GET /api/supplier_pricing/:id
pub async fn get_by_id(Path(id): Path<String>) -> ServiceResult<Json<SupplierPricing>> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a012_supplier_pricing::service::get_by_id(uuid).await?))
}

/// POST /api/supplier_pricing
pub async fn upsert(Json(dto): Json<SupplierPricingDto>) -> ServiceResult<Json<serde_json::Value>> {
    let id = match dto.id.clone().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            a012_supplier_pricing::service::update(dto).await?;
            id
        }
        None => a012_supplier_pricing::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({"id": id})))
}

/// DELETE /api/supplier_pricing/:id
pub async fn delete(Path(id): Path<String>) -> ServiceResult<()> {
    let uuid = parse_uuid(&id)?;
    a012_supplier_pricing::service::delete(uuid).await
}

/// GET /api/supplier_pricing/:id/affected
pub async fn affected(Path(id): Path<String>) -> ServiceResult<Json<Vec<AffectedProduct>>> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a012_supplier_pricing::service::affected_products(uuid).await?))
}
