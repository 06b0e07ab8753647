use super::repository::{self, WAREHOUSE_SERVICING_AREA};
use contracts::domain::a007_warehouse::aggregate::{Warehouse, WarehouseDto};
use sea_orm::TransactionTrait;
use std::collections::HashSet;
use uuid::Uuid;

use crate::domain::a008_servicing_area;
use crate::shared::data::db::get_connection;
use crate::shared::data::junction;
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};
use crate::shared::logger;

/// Все выбранные зоны должны существовать
async fn check_areas(aggregate: &Warehouse) -> ServiceResult<()> {
    if aggregate.servicing_area_ids.is_empty() {
        return Ok(());
    }
    let known: HashSet<String> = a008_servicing_area::repository::list_all()
        .await?
        .iter()
        .map(|a| a.to_string_id())
        .collect();
    let missing = unknown_ids(&aggregate.servicing_area_ids, &known);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(format!(
            "Unknown servicing area(s): {}",
            missing.join(", ")
        )))
    }
}

fn unknown_ids(ids: &[String], known: &HashSet<String>) -> Vec<String> {
    ids.iter().filter(|id| !known.contains(*id)).cloned().collect()
}

pub async fn create(dto: WarehouseDto) -> ServiceResult<Uuid> {
    let mut aggregate = Warehouse::new_for_insert(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    check_areas(&aggregate).await?;
    aggregate.before_write();

    let txn = get_connection().begin().await?;
    let id = repository::insert(&txn, &aggregate).await?;
    junction::replace_links(
        &txn,
        &WAREHOUSE_SERVICING_AREA,
        &aggregate.to_string_id(),
        &aggregate.servicing_area_ids,
    )
    .await?;
    txn.commit().await?;

    logger::log(
        "warehouse",
        &format!(
            "Warehouse '{}' created with {} servicing area(s)",
            aggregate.base.description,
            aggregate.servicing_area_ids.len()
        ),
    );
    Ok(id)
}

pub async fn update(dto: WarehouseDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Warehouse"))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    check_areas(&aggregate).await?;
    aggregate.before_write();

    let txn = get_connection().begin().await?;
    repository::update(&txn, &aggregate).await?;
    junction::replace_links(
        &txn,
        &WAREHOUSE_SERVICING_AREA,
        &aggregate.to_string_id(),
        &aggregate.servicing_area_ids,
    )
    .await?;
    txn.commit().await?;
    Ok(())
}

pub async fn delete(id: Uuid) -> ServiceResult<()> {
    let txn = get_connection().begin().await?;
    if !repository::soft_delete(&txn, id).await? {
        return Err(ServiceError::not_found("Warehouse"));
    }
    junction::delete_links(&txn, &WAREHOUSE_SERVICING_AREA, &id.to_string()).await?;
    txn.commit().await?;
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Warehouse> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Warehouse"))
}

pub async fn list_all() -> ServiceResult<Vec<Warehouse>> {
    Ok(repository::list_all().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_ids() {
        let known = HashSet::from(["a".to_string(), "b".to_string()]);
        let ids = vec!["a".to_string(), "z".to_string()];
        assert_eq!(unknown_ids(&ids, &known), vec!["z".to_string()]);
        assert!(unknown_ids(&[], &known).is_empty());
    }
}
