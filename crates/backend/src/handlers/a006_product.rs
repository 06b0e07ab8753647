use axum::extract::{Path, Query};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use contracts::domain::a006_product::aggregate::{Product, ProductDto};
use contracts::domain::a006_product::attachment::{ProductAttachment, ProductAttachmentDto};
use serde::Deserialize;
use serde_json::json;

use crate::domain::a006_product;
use crate::shared::error::{parse_uuid, ServiceResult};

/// GET /api/product
pub async fn list_all() -> ServiceResult<Json<Vec<Product>>> {
    Ok(Json(a006_product::service::list_all().await?))
}

/// GET /api/product/:id
pub async fn get_by_id(Path(id): Path<String>) -> ServiceResult<Json<Product>> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a006_product::service::get_by_id(uuid).await?))
}

/// POST /api/product
pub async fn upsert(Json(dto): Json<ProductDto>) -> ServiceResult<Json<serde_json::Value>> {
    let id = match dto.id.clone().filter(|id| !id.trim().is_empty()) {
        Some(id) => {
            a006_product::service::update(dto).await?;
            id
        }
        None => a006_product::service::create(dto).await?.to_string(),
    };
    Ok(Json(json!({"id": id})))
}

/// DELETE /api/product/:id
pub async fn delete(Path(id): Path<String>) -> ServiceResult<()> {
    let uuid = parse_uuid(&id)?;
    a006_product::service::delete(uuid).await
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/product/search?q=
pub async fn search(Query(query): Query<SearchQuery>) -> ServiceResult<Json<Vec<Product>>> {
    Ok(Json(a006_product::service::search(&query.q).await?))
}

/// GET /api/product/export
pub async fn export_csv() -> ServiceResult<impl IntoResponse> {
    let csv = a006_product::service::export_csv().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"products.csv\"",
            ),
        ],
        csv,
    ))
}

/// GET /api/product/:id/attachments
pub async fn list_attachments(
    Path(id): Path<String>,
) -> ServiceResult<Json<Vec<ProductAttachment>>> {
    let uuid = parse_uuid(&id)?;
    Ok(Json(a006_product::attachment_service::list(uuid).await?))
}

/// POST /api/product/:id/attachments
pub async fn save_attachment(
    Path(id): Path<String>,
    Json(dto): Json<ProductAttachmentDto>,
) -> ServiceResult<Json<serde_json::Value>> {
    let uuid = parse_uuid(&id)?;
    let attachment_id = a006_product::attachment_service::save(uuid, dto).await?;
    Ok(Json(json!({"id": attachment_id})))
}

/// DELETE /api/product/attachments/:attachment_id
pub async fn delete_attachment(Path(attachment_id): Path<String>) -> ServiceResult<()> {
    a006_product::attachment_service::delete(&attachment_id).await
}
