use axum::{extract::Path, Json};
use contracts::domain::a011_promotion::aggregate::{Promotion, PromotionDto};
use contracts::shared::pricing::AffectedProduct;
use serde_json::json;

use crate::domain::a011_promotion;
use crate::shared::error::{parse_uuid, ServiceResult};

/// GET /api/promotion
pub async fn list_all() -> ServiceResult<Json<Vec<Promotion>>> {
    Ok(Json(a011_promotion::service::list_all().await?))
}

/// GET /api/promotion/:id
pub async fn get_by_id(Path(id): Path<String>) -> ServiceResult<Json<Promotion>> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a011_promotion::service::get_by_id(uuid).await?))
}

/// POST /api/promotion
pub async fn upsert(Json(dto): Json<PromotionDto>) -> ServiceResult<Json<serde_json::Value>> {
    let id = match dto.id.clone().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            a011_promotion::service::update(dto).await?;
            id
        }
        None => a011_promotion::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({"id": id})))
}

/// DELETE /api/promotion/:id
pub async fn delete(Path(id): Path<String>) -> ServiceResult<()> {
    let uuid = parse_uuid(&id)?;
    a011_promotion::service::delete(uuid).await
}

/// GET /api/promotion/:id/affected
pub async fn affected(Path(id): Path<String>) -> ServiceResult<Json<Vec<AffectedProduct>>> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a011_promotion::service::affected_products(uuid).await?))
}
