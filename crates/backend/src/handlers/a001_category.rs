use axum::{extract::Path, Json};
use contracts::domain::a001_category::aggregate::{Category, CategoryDto, CategoryTreeNode};
use serde_json::json;

use crate::domain::a001_category;
use crate::shared::error::{parse_uuid, ServiceResult};

/// GET /api/category
pub async fn list_all() -> ServiceResult<Json<Vec<Category>>> {
    Ok(Json(a001_category::service::list_all().await?))
}

/// GET /api/category/:id
pub async fn get_by_id(Path(id): Path<String>) -> ServiceResult<Json<Category>> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a001_category::service::get_by_id(uuid).await?))
}

/// POST /api/category
pub async fn upsert(Json(dto): Json<CategoryDto>) -> ServiceResult<Json<serde_json::Value>> {
    let id = match dto.id.clone().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            a001_category::service::update(dto).await?;
            id
        }
        None => a001_category::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({"id": id})))
}

/// DELETE /api/category/:id
pub async fn delete(Path(id): Path<String>) -> ServiceResult<()> {
    let uuid = parse_uuid(&id)?;
    a001_category::service::delete(uuid).await
}

/// GET /api/category/tree
pub async fn tree() -> ServiceResult<Json<Vec<CategoryTreeNode>>> {
    Ok(Json(a001_category::service::tree().await?))
}
