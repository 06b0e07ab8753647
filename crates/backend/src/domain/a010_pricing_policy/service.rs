use super::repository;
use contracts::domain::a010_pricing_policy::aggregate::{PricingPolicy, PricingPolicyDto};
use contracts::shared::pricing::AffectedProduct;
use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::shared::data::db::get_connection;
use crate::shared::data::scope_store::{self, ScopeOwner};
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};
use crate::shared::logger;
use crate::shared::scope_resolver;

pub async fn create(dto: PricingPolicyDto) -> ServiceResult<Uuid> {
    let mut aggregate = PricingPolicy::new_for_insert(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();

    let txn = get_connection().begin().await?;
    let id = repository::insert(&txn, &aggregate).await?;
    scope_store::replace_scope(
        &txn,
        ScopeOwner::PricingPolicy,
        &aggregate.to_string_id(),
        &aggregate.scope,
    )
    .await?;
    txn.commit().await?;

    logger::log(
        "pricing",
        &format!("Pricing policy '{}' created", aggregate.base.description),
    );
    Ok(id)
}

pub async fn update(dto: PricingPolicyDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Pricing policy"))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();

    let txn = get_connection().begin().await?;
    repository::update(&txn, &aggregate).await?;
    scope_store::replace_scope(
        &txn,
        ScopeOwner::PricingPolicy,
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
        return Err(ServiceError::not_found("Pricing policy"));
    }
    scope_store::delete_scope(&txn, ScopeOwner::PricingPolicy, &id.to_string()).await?;
    txn.commit().await?;
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<PricingPolicy> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Pricing policy"))
}

pub async fn list_all() -> ServiceResult<Vec<PricingPolicy>> {
    Ok(repository::list_all().await?)
}

/// Товары под действием политики с ценой после корректировки прайсовой цены
pub async fn affected_products(id: Uuid) -> ServiceResult<Vec<AffectedProduct>> {
    let policy = get_by_id(id).await?;
    let products = scope_resolver::resolve_products(&policy.scope).await?;
    Ok(scope_resolver::affected_products(&products, |p| {
        Some(policy.adjustment.apply(p.list_price))
    }))
}
