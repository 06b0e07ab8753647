use chrono::Utc;
use contracts::domain::a007_warehouse::aggregate::{Warehouse, WarehouseId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, ConnectionTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::shared::data::db::get_connection;
use crate::shared::data::junction::{self, JunctionTable};

/// Склады <-> зоны обслуживания
pub const WAREHOUSE_SERVICING_AREA: JunctionTable = JunctionTable {
    table: "a007_warehouse_servicing_area",
    parent_column: "warehouse_id",
    child_column: "servicing_area_id",
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a007_warehouse")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Warehouse {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Warehouse {
            base: BaseAggregate::with_metadata(
                WarehouseId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            address: m.address,
            is_active: m.is_active,
            // заполняется из связующей таблицы
            servicing_area_ids: Vec::new(),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Warehouse) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.to_string_id()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        address: Set(aggregate.address.clone()),
        is_active: Set(aggregate.is_active),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all() -> anyhow::Result<Vec<Warehouse>> {
    let mut links = junction::load_all_links(conn(), &WAREHOUSE_SERVICING_AREA).await?;
    let mut items: Vec<Warehouse> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Warehouse::from)
        .map(|mut w| {
            w.servicing_area_ids = links.remove(&w.to_string_id()).unwrap_or_default();
            w
        })
        .collect();
    items.sort_by_key(|w| w.base.description.to_lowercase());
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Warehouse>> {
    let Some(mut warehouse) = Entity::find_by_id(id.to_string())
        .one(conn())
        .await?
        .map(Warehouse::from)
        .filter(|w| !w.base.metadata.is_deleted)
    else {
        return Ok(None);
    };
    warehouse.servicing_area_ids =
        junction::load_links(conn(), &WAREHOUSE_SERVICING_AREA, &id.to_string()).await?;
    Ok(Some(warehouse))
}

/// Только строка склада; связи пишет сервис в той же транзакции
pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &Warehouse) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(db).await?;
    Ok(uuid)
}

pub async fn update<C: ConnectionTrait>(db: &C, aggregate: &Warehouse) -> anyhow::Result<()> {
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
