use super::repository;
use contracts::domain::a005_supplier::aggregate::{Supplier, SupplierDto};
use uuid::Uuid;

use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};

pub async fn create(dto: SupplierDto) -> ServiceResult<Uuid> {
    let mut aggregate = Supplier::new_for_insert(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();
    Ok(repository::insert(&aggregate).await?)
}

pub async fn update(dto: SupplierDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Supplier"))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();
    Ok(repository::update(&aggregate).await?)
}

pub async fn delete(id: Uuid) -> ServiceResult<()> {
    if repository::soft_delete(id).await? {
        Ok(())
    } else {
        Err(ServiceError::not_found("Supplier"))
    }
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Supplier> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Supplier"))
}

pub async fn list_all() -> ServiceResult<Vec<Supplier>> {
    Ok(repository::list_all().await?)
}
