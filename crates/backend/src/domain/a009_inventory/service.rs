use super::repository;
use contracts::domain::a009_inventory::aggregate::{
    InventoryFilter, InventoryRecord, InventoryRecordDto,
};

use crate::domain::{a006_product, a007_warehouse};
use crate::shared::data::db::get_connection;
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};

pub async fn list(filter: InventoryFilter) -> ServiceResult<Vec<InventoryRecord>> {
    Ok(repository::list(get_connection(), &filter).await?)
}

pub async fn get_by_id(id: &str) -> ServiceResult<InventoryRecord> {
    repository::get_by_id(get_connection(), id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Inventory record"))
}

/// Создать или обновить остаток
///
/// Без `id` запись ищется по паре товар/склад, так что повторный POST
/// для той же пары обновляет количества, а не создаёт дубль.
pub async fn upsert(dto: InventoryRecordDto) -> ServiceResult<String> {
    let db = get_connection();

    let existing = match dto.id.as_deref().filter(|s| !s.is_empty()) {
        Some(id) => Some(
            repository::get_by_id(db, id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Inventory record"))?,
        ),
        None => repository::find_by_pair(db, dto.product_id.trim(), dto.warehouse_id.trim()).await?,
    };

    match existing {
        Some(mut record) => {
            record.update(&dto);
            record.validate().map_err(ServiceError::Validation)?;
            repository::update(db, &record).await?;
            Ok(record.id)
        }
        None => {
            let record = InventoryRecord::new_for_insert(&dto);
            record.validate().map_err(ServiceError::Validation)?;
            check_pair(&record).await?;
            repository::insert(db, &record).await?;
            tracing::info!(
                "Inventory record created: product {} at warehouse {}",
                record.product_id,
                record.warehouse_id
            );
            Ok(record.id)
        }
    }
}

async fn check_pair(record: &InventoryRecord) -> ServiceResult<()> {
    let product_id = parse_uuid(&record.product_id)?;
    if a006_product::repository::get_by_id(product_id).await?.is_none() {
        return Err(ServiceError::Validation(format!(
            "Product {} does not exist",
            record.product_id
        )));
    }
    let warehouse_id = parse_uuid(&record.warehouse_id)?;
    if a007_warehouse::repository::get_by_id(warehouse_id).await?.is_none() {
        return Err(ServiceError::Validation(format!(
            "Warehouse {} does not exist",
            record.warehouse_id
        )));
    }
    Ok(())
}

pub async fn delete(id: &str) -> ServiceResult<()> {
    if repository::delete(get_connection(), id).await? {
        Ok(())
    } else {
        Err(ServiceError::not_found("Inventory record"))
    }
}
