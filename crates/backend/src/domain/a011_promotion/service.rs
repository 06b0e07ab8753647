use super::repository;
use contracts::domain::a011_promotion::aggregate::{Promotion, PromotionDto};
use contracts::shared::pricing::AffectedProduct;
use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::shared::data::db::get_connection;
use crate::shared::data::scope_store::{self, ScopeOwner};
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};
use crate::shared::logger;
use crate::shared::scope_resolver;

async fn check_code(aggregate: &Promotion) -> ServiceResult<()> {
    let id = aggregate.to_string_id();
    if repository::find_by_code(aggregate.promo_code(), Some(&id))
        .await?
        .is_some()
    {
        return Err(ServiceError::Validation(format!(
            "Promo code '{}' is already in use",
            aggregate.promo_code()
        )));
    }
    Ok(())
}

pub async fn create(dto: PromotionDto) -> ServiceResult<Uuid> {
    let mut aggregate = Promotion::new_for_insert(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    check_code(&aggregate).await?;
    aggregate.before_write();

    let txn = get_connection().begin().await?;
    let id = repository::insert(&txn, &aggregate).await?;
    scope_store::replace_scope(
        &txn,
        ScopeOwner::Promotion,
        &aggregate.to_string_id(),
        &aggregate.scope,
    )
    .await?;
    txn.commit().await?;

    logger::log(
        "pricing",
        &format!("Promotion {} created", aggregate.promo_code()),
    );
    Ok(id)
}

pub async fn update(dto: PromotionDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Promotion"))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    check_code(&aggregate).await?;
    aggregate.before_write();

    let txn = get_connection().begin().await?;
    repository::update(&txn, &aggregate).await?;
    scope_store::replace_scope(
        &txn,
        ScopeOwner::Promotion,
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
        return Err(ServiceError::not_found("Promotion"));
    }
    scope_store::delete_scope(&txn, ScopeOwner::Promotion, &id.to_string()).await?;
    txn.commit().await?;
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Promotion> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Promotion"))
}

pub async fn list_all() -> ServiceResult<Vec<Promotion>> {
    Ok(repository::list_all().await?)
}

/// Товары под действием промоакции с ценой после скидки
pub async fn affected_products(id: Uuid) -> ServiceResult<Vec<AffectedProduct>> {
    let promotion = get_by_id(id).await?;
    let products = scope_resolver::resolve_products(&promotion.scope).await?;
    Ok(scope_resolver::affected_products(&products, |p| {
        Some(promotion.discount.apply(p.list_price))
    }))
}
