use super::repository;
use contracts::domain::a003_specification::aggregate::{Specification, SpecificationDto};
use uuid::Uuid;

use crate::domain::a001_category;
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};

async fn check_category(spec: &Specification) -> ServiceResult<()> {
    if let Some(category_id) = &spec.category_id {
        let id = parse_uuid(category_id)?;
        if a001_category::repository::get_by_id(id).await?.is_none() {
            return Err(ServiceError::Validation(format!(
                "Category {} does not exist",
                category_id
            )));
        }
    }
    Ok(())
}

pub async fn create(dto: SpecificationDto) -> ServiceResult<Uuid> {
    let mut aggregate = Specification::new_for_insert(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    check_category(&aggregate).await?;
    aggregate.before_write();
    Ok(repository::insert(&aggregate).await?)
}

pub async fn update(dto: SpecificationDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Specification"))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    check_category(&aggregate).await?;
    aggregate.before_write();
    Ok(repository::update(&aggregate).await?)
}

pub async fn delete(id: Uuid) -> ServiceResult<()> {
    if repository::soft_delete(id).await? {
        Ok(())
    } else {
        Err(ServiceError::not_found("Specification"))
    }
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Specification> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Specification"))
}

pub async fn list_all() -> ServiceResult<Vec<Specification>> {
    Ok(repository::list_all().await?)
}
