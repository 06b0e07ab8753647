use axum::{extract::Path, Json};
use contracts::domain::a010_pricing_policy::aggregate::{PricingPolicy, PricingPolicyDto};
use contracts::shared::pricing::AffectedProduct;
use serde_json::json;

use crate::domain::a010_pricing_policy;
use crate::shared::error::{parse_uuid, ServiceResult};

/// GET /api/pricing_policy
pub async fn list_all() -> ServiceResult<Json<Vec<PricingPolicy>>> {
    Ok(Json(a010_pricing_policy::service::list_all().await?))
}

/// GET /api/pricing_policy/:id
pub async fn get_by_id(Path(id): Path<String>) -> ServiceResult<Json<PricingPolicy>> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a010_pricing_policy::service::get_by_id(uuid).await?))
}

/// POST /api/pricing_policy
pub async fn upsert(Json(dto): Json<PricingPolicyDto>) -> ServiceResult<Json<serde_json::Value>> {
    let id = match dto.id.clone().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            a010_pricing_policy::service::update(dto).await?;
            id
        }
        None => a010_pricing_policy::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({"id": id})))
}

/// DELETE /api/pricing_policy/:id
pub async fn delete(Path(id): Path<String>) -> ServiceResult<()> {
    let uuid = parse_uuid(&id)?;
    a010_pricing_policy::service::delete(uuid).await
}

/// GET /api/pricing_policy/:id/affected
pub async fn affected(Path(id): Path<String>) -> ServiceResult<Json<Vec<AffectedProduct>>> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a010_pricing_policy::service::affected_products(uuid).await?))
}
