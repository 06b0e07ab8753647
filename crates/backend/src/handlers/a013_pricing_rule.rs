use axum::{extract::Path, Json};
use contracts::domain::a013_pricing_rule::aggregate::{PricingRule, PricingRuleDto};
use contracts::shared::pricing::AffectedProduct;
use serde_json::json;

use crate::domain::a013_pricing_rule;
use crate::shared::error::{parse_uuid, ServiceResult};

/// GET /api/pricing_rule
pub async fn list_all() -> ServiceResult<Json<Vec<PricingRule>>> {
    Ok(Json(a013_pricing_rule::service::list_all().await?))
}

/// GET /api/pricing_rule/:id
pub async fn get_by_id(Path(id): Path<String>) -> ServiceResult<Json<PricingRule>> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a013_pricing_rule::service::get_by_id(uuid).await?))
}

/// POST /api/pricing_rule
pub async fn upsert(Json(dto): Json<PricingRuleDto>) -> ServiceResult<Json<serde_json::Value>> {
    let id = match dto.id.clone().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            a013_pricing_rule::service::update(dto).await?;
            id
        }
        None => a013_pricing_rule::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({"id": id})))
}

/// DELETE /api/pricing_rule/:id
pub async fn delete(Path(id): Path<String>) -> ServiceResult<()> {
    let uuid = parse_uuid(&id)?;
    a013_pricing_rule::service::delete(uuid).await
}

/// GET /api/pricing_rule/:id/preview
pub async fn preview(Path(id): Path<String>) -> ServiceResult<Json<Vec<AffectedProduct>>> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a013_pricing_rule::service::preview(uuid).await?))
}
