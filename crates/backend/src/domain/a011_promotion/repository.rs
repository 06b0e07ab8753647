use chrono::{NaiveDate, Utc};
use contracts::domain::a011_promotion::aggregate::{Promotion, PromotionId};
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
#[sea_orm(table_name = "a011_promotion")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub discount_kind: String,
    pub discount_value: f64,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Promotion {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Promotion {
            base: BaseAggregate::with_metadata(
                PromotionId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            discount: PriceAdjustment {
                kind: AdjustmentKind::parse(&m.discount_kind).unwrap_or_default(),
                value: m.discount_value,
            },
            starts_on: m.starts_on,
            ends_on: m.ends_on,
            is_active: m.is_active,
            scope: PricingScope::default(),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Promotion) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.to_string_id()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        discount_kind: Set(aggregate.discount.kind.as_str().to_string()),
        discount_value: Set(aggregate.discount.value),
        starts_on: Set(aggregate.starts_on),
        ends_on: Set(aggregate.ends_on),
        is_active: Set(aggregate.is_active),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

/// Сначала более поздние по дате начала
pub async fn list_all() -> anyhow::Result<Vec<Promotion>> {
    let mut scopes = scope_store::load_all_scopes(conn(), ScopeOwner::Promotion).await?;
    let mut items: Vec<Promotion> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Promotion::from)
        .map(|mut p| {
            p.scope = scopes.remove(&p.to_string_id()).unwrap_or_default();
            p
        })
        .collect();
    items.sort_by_key(|p| (Reverse(p.starts_on), p.base.code.clone()));
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Promotion>> {
    let Some(mut promotion) = Entity::find_by_id(id.to_string())
        .one(conn())
        .await?
        .map(Promotion::from)
        .filter(|p| !p.base.metadata.is_deleted)
    else {
        return Ok(None);
    };
    promotion.scope =
        scope_store::load_scope(conn(), ScopeOwner::Promotion, &id.to_string()).await?;
    Ok(Some(promotion))
}

/// Промоакция с таким промокодом (кроме `except_id`)
pub async fn find_by_code(code: &str, except_id: Option<&str>) -> anyhow::Result<Option<Promotion>> {
    let mut query = Entity::find()
        .filter(Column::Code.eq(code))
        .filter(Column::IsDeleted.eq(false));
    if let Some(id) = except_id {
        query = query.filter(Column::Id.ne(id));
    }
    Ok(query.one(conn()).await?.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &Promotion) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(db).await?;
    Ok(uuid)
}

pub async fn update<C: ConnectionTrait>(db: &C, aggregate: &Promotion) -> anyhow::Result<()> {
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
