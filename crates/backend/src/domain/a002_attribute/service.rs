use super::repository;
use contracts::domain::a002_attribute::aggregate::{Attribute, AttributeDto};
use uuid::Uuid;

use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};

pub async fn create(dto: AttributeDto) -> ServiceResult<Uuid> {
    let mut aggregate = Attribute::new_for_insert(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();
    Ok(repository::insert(&aggregate).await?)
}

pub async fn update(dto: AttributeDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Attribute"))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();
    Ok(repository::update(&aggregate).await?)
}

pub async fn delete(id: Uuid) -> ServiceResult<()> {
    if repository::soft_delete(id).await? {
        Ok(())
    } else {
        Err(ServiceError::not_found("Attribute"))
    }
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Attribute> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Attribute"))
}

pub async fn list_all() -> ServiceResult<Vec<Attribute>> {
    Ok(repository::list_all().await?)
}
