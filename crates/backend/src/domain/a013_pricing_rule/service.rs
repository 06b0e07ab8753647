use super::repository;
use contracts::domain::a013_pricing_rule::aggregate::{PricingRule, PricingRuleDto};
use contracts::shared::pricing::AffectedProduct;
use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::shared::data::db::get_connection;
use crate::shared::data::scope_store::{self, ScopeOwner};
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};
use crate::shared::logger;
use crate::shared::scope_resolver;

pub async fn create(dto: PricingRuleDto) -> ServiceResult<Uuid> {
    let mut aggregate = PricingRule::new_for_insert(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();

    let txn = get_connection().begin().await?;
    let id = repository::insert(&txn, &aggregate).await?;
    scope_store::replace_scope(
        &txn,
        ScopeOwner::PricingRule,
        &aggregate.to_string_id(),
        &aggregate.scope,
    )
    .await?;
    txn.commit().await?;

    logger::log(
        "pricing",
        &format!("Pricing rule '{}' created", aggregate.base.description),
    );
    Ok(id)
}

pub async fn update(dto: PricingRuleDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Pricing rule"))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    aggregate.before_write();

    let txn = get_connection().begin().await?;
    repository::update(&txn, &aggregate).await?;
    scope_store::replace_scope(
        &txn,
        ScopeOwner::PricingRule,
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
        return Err(ServiceError::not_found("Pricing rule"));
    }
    scope_store::delete_scope(&txn, ScopeOwner::PricingRule, &id.to_string()).await?;
    txn.commit().await?;
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<PricingRule> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Pricing rule"))
}

pub async fn list_all() -> ServiceResult<Vec<PricingRule>> {
    Ok(repository::list_all().await?)
}

/// Расчётные цены для всех товаров области действия правила
pub async fn preview(id: Uuid) -> ServiceResult<Vec<AffectedProduct>> {
    let rule = get_by_id(id).await?;
    let products = scope_resolver::resolve_products(&rule.scope).await?;
    let rows = scope_resolver::affected_products(&products, |p| {
        Some(rule.price_for(p.cost_price, p.list_price))
    });
    tracing::debug!("Pricing rule {} preview: {} products", id, rows.len());
    Ok(rows)
}
