//! Хранение наборов включений/исключений ценовых конструкций
//!
//! Одна таблица `pricing_scope_item` на все четыре конструкции,
//! владелец различается по `owner_kind` (индекс агрегата).

use contracts::shared::scope::{PricingScope, ScopeEntry, ScopeItemKind, ScopeMode};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, ConnectionTrait, QueryOrder, Set};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pricing_scope_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub owner_kind: String,
    pub owner_id: String,
    pub item_kind: String,
    pub item_id: String,
    pub mode: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Владелец набора
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeOwner {
    PricingPolicy,
    Promotion,
    SupplierPricing,
    PricingRule,
}

impl ScopeOwner {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeOwner::PricingPolicy => "a010",
            ScopeOwner::Promotion => "a011",
            ScopeOwner::SupplierPricing => "a012",
            ScopeOwner::PricingRule => "a013",
        }
    }
}

impl TryFrom<Model> for ScopeEntry {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let item_kind = ScopeItemKind::parse(&m.item_kind)
            .ok_or_else(|| anyhow::anyhow!("unknown scope item kind '{}'", m.item_kind))?;
        let mode = ScopeMode::parse(&m.mode)
            .ok_or_else(|| anyhow::anyhow!("unknown scope mode '{}'", m.mode))?;
        Ok(ScopeEntry {
            item_kind,
            mode,
            item_id: m.item_id,
        })
    }
}

/// Удалить набор владельца
pub async fn delete_scope<C: ConnectionTrait>(
    db: &C,
    owner: ScopeOwner,
    owner_id: &str,
) -> anyhow::Result<u64> {
    let result = Entity::delete_many()
        .filter(Column::OwnerKind.eq(owner.as_str()))
        .filter(Column::OwnerId.eq(owner_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Полная замена набора: удалить все строки владельца, вставить текущие
///
/// Набор нормализуется перед записью, так что id не попадёт одновременно
/// во включения и исключения.
pub async fn replace_scope<C: ConnectionTrait>(
    db: &C,
    owner: ScopeOwner,
    owner_id: &str,
    scope: &PricingScope,
) -> anyhow::Result<usize> {
    delete_scope(db, owner, owner_id).await?;

    let entries = scope.clone().normalized().entries();
    if entries.is_empty() {
        return Ok(0);
    }

    let rows: Vec<ActiveModel> = entries
        .iter()
        .map(|e| ActiveModel {
            id: NotSet,
            owner_kind: Set(owner.as_str().to_string()),
            owner_id: Set(owner_id.to_string()),
            item_kind: Set(e.item_kind.as_str().to_string()),
            item_id: Set(e.item_id.clone()),
            mode: Set(e.mode.as_str().to_string()),
        })
        .collect();
    Entity::insert_many(rows).exec(db).await?;

    tracing::debug!(
        "Scope of {} {} replaced: {} rows",
        owner.as_str(),
        owner_id,
        entries.len()
    );
    Ok(entries.len())
}

pub async fn load_scope<C: ConnectionTrait>(
    db: &C,
    owner: ScopeOwner,
    owner_id: &str,
) -> anyhow::Result<PricingScope> {
    let rows = Entity::find()
        .filter(Column::OwnerKind.eq(owner.as_str()))
        .filter(Column::OwnerId.eq(owner_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;

    let mut entries = Vec::with_capacity(rows.len());
    for row in rows {
        match ScopeEntry::try_from(row) {
            Ok(entry) => entries.push(entry),
            Err(e) => tracing::warn!("Skipping scope row of {} {}: {}", owner.as_str(), owner_id, e),
        }
    }
    Ok(PricingScope::from_entries(entries))
}

/// Наборы всех владельцев одного вида (для списков)
pub async fn load_all_scopes<C: ConnectionTrait>(
    db: &C,
    owner: ScopeOwner,
) -> anyhow::Result<HashMap<String, PricingScope>> {
    let rows = Entity::find()
        .filter(Column::OwnerKind.eq(owner.as_str()))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;

    let mut grouped: HashMap<String, Vec<ScopeEntry>> = HashMap::new();
    for row in rows {
        let owner_id = row.owner_id.clone();
        match ScopeEntry::try_from(row) {
            Ok(entry) => grouped.entry(owner_id).or_default().push(entry),
            Err(e) => tracing::warn!("Skipping scope row of {} {}: {}", owner.as_str(), owner_id, e),
        }
    }
    Ok(grouped
        .into_iter()
        .map(|(id, entries)| (id, PricingScope::from_entries(entries)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_connection;

    fn sample_scope() -> PricingScope {
        let mut scope = PricingScope::default();
        scope.include(ScopeItemKind::Category, "tools");
        scope.include(ScopeItemKind::Product, "p1");
        scope.exclude(ScopeItemKind::Product, "p9");
        scope.exclude(ScopeItemKind::Category, "garden");
        scope
    }

    #[tokio::test]
    async fn test_replace_and_load() {
        let db = test_connection().await;
        let n = replace_scope(&db, ScopeOwner::PricingPolicy, "pp1", &sample_scope())
            .await
            .unwrap();
        assert_eq!(n, 4);

        let loaded = load_scope(&db, ScopeOwner::PricingPolicy, "pp1").await.unwrap();
        assert_eq!(loaded, sample_scope());
    }

    #[tokio::test]
    async fn test_replace_removes_stale_rows() {
        let db = test_connection().await;
        replace_scope(&db, ScopeOwner::Promotion, "pr1", &sample_scope())
            .await
            .unwrap();

        let mut next = PricingScope::default();
        next.include(ScopeItemKind::Product, "p2");
        replace_scope(&db, ScopeOwner::Promotion, "pr1", &next)
            .await
            .unwrap();

        let loaded = load_scope(&db, ScopeOwner::Promotion, "pr1").await.unwrap();
        assert_eq!(loaded.included_products, vec!["p2"]);
        assert!(loaded.included_categories.is_empty());
        assert!(loaded.excluded_products.is_empty());
    }

    #[tokio::test]
    async fn test_owners_are_isolated() {
        let db = test_connection().await;
        replace_scope(&db, ScopeOwner::PricingRule, "same-id", &sample_scope())
            .await
            .unwrap();
        replace_scope(&db, ScopeOwner::SupplierPricing, "same-id", &PricingScope::default())
            .await
            .unwrap();

        assert_eq!(
            load_scope(&db, ScopeOwner::PricingRule, "same-id")
                .await
                .unwrap()
                .len(),
            4
        );
        assert!(load_scope(&db, ScopeOwner::SupplierPricing, "same-id")
            .await
            .unwrap()
            .is_empty());

        delete_scope(&db, ScopeOwner::PricingRule, "same-id").await.unwrap();
        assert!(load_scope(&db, ScopeOwner::PricingRule, "same-id")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_conflicting_input_stored_as_exclusion() {
        let db = test_connection().await;
        let scope = PricingScope {
            included_products: vec!["p1".into()],
            excluded_products: vec!["p1".into()],
            ..Default::default()
        };
        replace_scope(&db, ScopeOwner::PricingPolicy, "pp2", &scope)
            .await
            .unwrap();
        let loaded = load_scope(&db, ScopeOwner::PricingPolicy, "pp2").await.unwrap();
        assert!(loaded.included_products.is_empty());
        assert_eq!(loaded.excluded_products, vec!["p1"]);
    }

    #[tokio::test]
    async fn test_load_all_groups_by_owner() {
        let db = test_connection().await;
        replace_scope(&db, ScopeOwner::PricingRule, "r1", &sample_scope())
            .await
            .unwrap();
        let mut other = PricingScope::default();
        other.include(ScopeItemKind::Product, "p5");
        replace_scope(&db, ScopeOwner::PricingRule, "r2", &other)
            .await
            .unwrap();
        replace_scope(&db, ScopeOwner::Promotion, "x", &other)
            .await
            .unwrap();

        let all = load_all_scopes(&db, ScopeOwner::PricingRule).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["r1"], sample_scope());
        assert_eq!(all["r2"].included_products, vec!["p5"]);
    }
}
