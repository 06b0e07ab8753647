use chrono::Utc;
use contracts::domain::a002_attribute::aggregate::{Attribute, AttributeDataType, AttributeId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, QueryFilter, Set};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a002_attribute")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub data_type: String,
    pub unit: Option<String>,
    /// JSON-массив вариантов
    pub options: String,
    pub is_filterable: bool,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Attribute {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let options: Vec<String> = serde_json::from_str(&m.options).unwrap_or_else(|e| {
            tracing::warn!("Attribute {}: bad options JSON: {}", m.id, e);
            Vec::new()
        });

        Attribute {
            base: BaseAggregate::with_metadata(
                AttributeId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            data_type: AttributeDataType::parse(&m.data_type).unwrap_or_default(),
            unit: m.unit,
            options,
            is_filterable: m.is_filterable,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Attribute) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(aggregate.to_string_id()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        data_type: Set(aggregate.data_type.as_str().to_string()),
        unit: Set(aggregate.unit.clone()),
        options: Set(serde_json::to_string(&aggregate.options)?),
        is_filterable: Set(aggregate.is_filterable),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    })
}

pub async fn list_all() -> anyhow::Result<Vec<Attribute>> {
    let mut items: Vec<Attribute> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by_key(|a| a.base.description.to_lowercase());
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Attribute>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result
        .map(Attribute::from)
        .filter(|a| !a.base.metadata.is_deleted))
}

pub async fn insert(aggregate: &Attribute) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate)?.insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Attribute) -> anyhow::Result<()> {
    let mut active = to_active(aggregate)?;
    active.created_at = NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
