use super::repository;
use contracts::domain::a012_supplier_pricing::aggregate::{SupplierPricing, SupplierPricingDto};
use contracts::shared::pricing::AffectedProduct;
use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::domain::a005_supplier;
use crate::shared::data::db::get_connection;
use crate::shared::data::scope_store::{self, ScopeOwner};
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};
use crate::shared::logger;
use crate::shared::scope_resolver;

async fn check_supplier(aggregate: &SupplierPricing) -> ServiceResult<()> {
    let supplier_id = parse_uuid(&aggregate.supplier_id)?;
    if a005_supplier::repository::get_by_id(supplier_id)
        .await?
        .is_none()
    {
        return Err(ServiceError::Validation(format!(
            "Supplier {} does not exist",
            aggregate.supplier_id
        )));
    }
    Ok(())
}

pub async fn create(dto: SupplierPricingDto) -> ServiceResult<Uuid> {
    let mut aggregate = SupplierPricing::new_for_insert(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    check_supplier(&aggregate).await?;
    aggregate.before_write();

    let txn = get_connection().begin().await?;
    let id = repository::insert(&txn, &aggregate).await?;
    scope_store::replace_scope(
        &txn,
        ScopeOwner::SupplierPricing,
        &aggregate.to_string_id(),
        &aggregate.scope,
    )
    .await?;
    txn.commit().await?;

    logger::log(
        "pricing",
        &format!(
            "Supplier pricing {} created for supplier {}",
            aggregate.base.code, aggregate.supplier_id
        ),
    );
    Ok(id)
}

pub async fn update(dto: SupplierPricingDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Supplier pricing"))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    check_supplier(&aggregate).await?;
    aggregate.before_write();

    let txn = get_connection().begin().await?;
    repository::update(&txn, &aggregate).await?;
    scope_store::replace_scope(
        &txn,
        ScopeOwner::SupplierPricing,
        &aggregate.to_string_id(),
        &aggregate.scope,
    )
    .await?;
    txn.commit().await?;
    Ok(())
}

pub async fn delete(id: Uuid) -> ServiceResult<()> {
    let txn = get_connection().begin().await?;
    if !repository::soft_delete(&txn, id).await? {
        return Err(ServiceError::not_found("Supplier pricing"));
    }
    scope_store::delete_scope(&txn, ScopeOwner::SupplierPricing, &id.to_string()).await?;
    txn.commit().await?;
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<SupplierPricing> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Supplier pricing"))
}

pub async fn list_all() -> ServiceResult<Vec<SupplierPricing>> {
    Ok(repository::list_all().await?)
}

/// Товары под условиями поставщика с закупочной ценой после скидки
pub async fn affected_products(id: Uuid) -> ServiceResult<Vec<AffectedProduct>> {
    let terms = get_by_id(id).await?;
    let products = scope_resolver::resolve_products(&terms.scope).await?;
    Ok(scope_resolver::affected_products(&products, |p| {
        Some(terms.net_cost(p.cost_price))
    }))
}
