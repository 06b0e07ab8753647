use chrono::{NaiveDate, Utc};
use contracts::domain::a010_pricing_policy::aggregate::{PricingPolicy, PricingPolicyId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::shared::pricing::{AdjustmentKind, PriceAdjustment};
use contracts::shared::scope::PricingScope;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, ConnectionTrait, QueryFilter, Set};
use std::cmp::Reverse;
use uuid::Uuid;

use crate::shared::data::db::get_connection;
use crate::shared::data::scope_store::{self, ScopeOwner};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a010_pricing_policy")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub adjustment_kind: String,
    pub adjustment_value: f64,
    pub priority: i32,
    pub is_active: bool,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PricingPolicy {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        PricingPolicy {
            base: BaseAggregate::with_metadata(
                PricingPolicyId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            adjustment: PriceAdjustment {
                kind: AdjustmentKind::parse(&m.adjustment_kind).unwrap_or_default(),
                value: m.adjustment_value,
            },
            priority: m.priority,
            is_active: m.is_active,
            valid_from: m.valid_from,
            valid_to: m.valid_to,
            scope: PricingScope::default(),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &PricingPolicy) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.to_string_id()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        adjustment_kind: Set(aggregate.adjustment.kind.as_str().to_string()),
        adjustment_value: Set(aggregate.adjustment.value),
        priority: Set(aggregate.priority),
        is_active: Set(aggregate.is_active),
        valid_from: Set(aggregate.valid_from),
        valid_to: Set(aggregate.valid_to),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

/// По убыванию приоритета, затем по наименованию
pub async fn list_all() -> anyhow::Result<Vec<PricingPolicy>> {
    let mut scopes = scope_store::load_all_scopes(conn(), ScopeOwner::PricingPolicy).await?;
    let mut items: Vec<PricingPolicy> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(PricingPolicy::from)
        .map(|mut p| {
            p.scope = scopes.remove(&p.to_string_id()).unwrap_or_default();
            p
        })
        .collect();
    items.sort_by_key(|p| (Reverse(p.priority), p.base.description.to_lowercase()));
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<PricingPolicy>> {
    let Some(mut policy) = Entity::find_by_id(id.to_string())
        .one(conn())
        .await?
        .map(PricingPolicy::from)
        .filter(|p| !p.base.metadata.is_deleted)
    else {
        return Ok(None);
    };
    policy.scope =
        scope_store::load_scope(conn(), ScopeOwner::PricingPolicy, &id.to_string()).await?;
    Ok(Some(policy))
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &PricingPolicy) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(db).await?;
    Ok(uuid)
}

pub async fn update<C: ConnectionTrait>(db: &C, aggregate: &PricingPolicy) -> anyhow::Result<()> {
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
