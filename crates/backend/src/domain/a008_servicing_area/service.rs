use super::repository;
use contracts::domain::a008_servicing_area::aggregate::{ServicingArea, ServicingAreaDto};
use uuid::Uuid;

use crate::domain::a007_warehouse;
use crate::shared::data::db::get_connection;
use crate::shared::data::junction;
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};

pub async fn create(dto: ServicingAreaDto) -> ServiceResult<Uuid> {
    let mut aggregate = ServicingArea::new_for_insert(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();
    Ok(repository::insert(&aggregate).await?)
}

pub async fn update(dto: ServicingAreaDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Servicing area"))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();
    Ok(repository::update(&aggregate).await?)
}

/// Удалённая зона перестаёт числиться за складами
pub async fn delete(id: Uuid) -> ServiceResult<()> {
    if !repository::soft_delete(id).await? {
        return Err(ServiceError::not_found("Servicing area"));
    }
    let unlinked = junction::delete_children(
        get_connection(),
        &a007_warehouse::repository::WAREHOUSE_SERVICING_AREA,
        &id.to_string(),
    )
    .await?;
    if unlinked > 0 {
        tracing::info!("Servicing area {} unlinked from {} warehouse(s)", id, unlinked);
    }
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<ServicingArea> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Servicing area"))
}

pub async fn list_all() -> ServiceResult<Vec<ServicingArea>> {
    Ok(repository::list_all().await?)
}
