use chrono::Utc;
use contracts::domain::a012_supplier_pricing::aggregate::{SupplierPricing, SupplierPricingId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::shared::scope::PricingScope;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, ConnectionTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::shared::data::db::get_connection;
use crate::shared::data::scope_store::{self, ScopeOwner};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a012_supplier_pricing")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub supplier_id: String,
    pub discount_percent: f64,
    pub min_order_qty: i32,
    pub lead_time_days: i32,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SupplierPricing {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        SupplierPricing {
            base: BaseAggregate::with_metadata(
                SupplierPricingId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            supplier_id: m.supplier_id,
            discount_percent: m.discount_percent,
            min_order_qty: m.min_order_qty,
            lead_time_days: m.lead_time_days,
            is_active: m.is_active,
            scope: PricingScope::default(),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &SupplierPricing) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.to_string_id()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        supplier_id: Set(aggregate.supplier_id.clone()),
        discount_percent: Set(aggregate.discount_percent),
        min_order_qty: Set(aggregate.min_order_qty),
        lead_time_days: Set(aggregate.lead_time_days),
        is_active: Set(aggregate.is_active),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

/// По поставщику, затем по наименованию
pub async fn list_all() -> anyhow::Result<Vec<SupplierPricing>> {
    let mut scopes = scope_store::load_all_scopes(conn(), ScopeOwner::SupplierPricing).await?;
    let mut items: Vec<SupplierPricing> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(SupplierPricing::from)
        .map(|mut p| {
            p.scope = scopes.remove(&p.to_string_id()).unwrap_or_default();
            p
        })
        .collect();
    items.sort_by_key(|p| (p.supplier_id.clone(), p.base.description.to_lowercase()));
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<SupplierPricing>> {
    let Some(mut aggregate) = Entity::find_by_id(id.to_string())
        .one(conn())
        .await?
        .map(SupplierPricing::from)
        .filter(|p| !p.base.metadata.is_deleted)
    else {
        return Ok(None);
    };
    aggregate.scope =
        scope_store::load_scope(conn(), ScopeOwner::SupplierPricing, &id.to_string()).await?;
    Ok(Some(aggregate))
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &SupplierPricing) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(db).await?;
    Ok(uuid)
}

pub async fn update<C: ConnectionTrait>(db: &C, aggregate: &SupplierPricing) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = NotSet;
    active.update(db).await?;
    Ok(())
}

pub async fn soft_delete<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
