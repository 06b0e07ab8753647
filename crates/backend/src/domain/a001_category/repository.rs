use chrono::Utc;
use contracts::domain::a001_category::aggregate::{Category, CategoryId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, ConnectionTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub parent_id: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Category {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Category {
            base: BaseAggregate::with_metadata(
                CategoryId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            parent_id: m.parent_id,
            sort_order: m.sort_order,
            is_active: m.is_active,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Category) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.to_string_id()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        parent_id: Set(aggregate.parent_id.clone()),
        sort_order: Set(aggregate.sort_order),
        is_active: Set(aggregate.is_active),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

/// Все неудалённые категории: по sort_order, затем по названию
pub async fn list_all() -> anyhow::Result<Vec<Category>> {
    let mut items: Vec<Category> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| {
        a.sort_order.cmp(&b.sort_order).then_with(|| {
            a.base
                .description
                .to_lowercase()
                .cmp(&b.base.description.to_lowercase())
        })
    });
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Category>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into).filter(|c: &Category| !c.base.metadata.is_deleted))
}

pub async fn insert(aggregate: &Category) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Category) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = NotSet;
    active.update(conn()).await?;
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

/// Дочерние категории поднимаются к родителю удаляемой
pub async fn reparent_children<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    new_parent: Option<String>,
) -> anyhow::Result<u64> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::ParentId, Expr::value(new_parent))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::ParentId.eq(id.to_string()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_connection;
    use contracts::domain::a001_category::aggregate::CategoryDto;
    use sea_orm::TransactionTrait;

    fn category(name: &str, parent: Option<&Category>) -> Category {
        Category::new_for_insert(&CategoryDto {
            description: name.into(),
            parent_id: parent.map(|p| p.to_string_id()),
            ..Default::default()
        })
    }

    async fn parent_of(db: &DatabaseConnection, c: &Category) -> Option<String> {
        Entity::find_by_id(c.to_string_id())
            .one(db)
            .await
            .unwrap()
            .unwrap()
            .parent_id
    }

    #[tokio::test]
    async fn test_delete_moves_children_to_grandparent() {
        let db = test_connection().await;
        let tools = category("Tools", None);
        let power = category("Power tools", Some(&tools));
        let drills = category("Drills", Some(&power));
        let saws = category("Saws", Some(&power));
        for c in [&tools, &power, &drills, &saws] {
            to_active(c).insert(&db).await.unwrap();
        }

        let txn = db.begin().await.unwrap();
        let moved = reparent_children(&txn, power.base.id.value(), power.parent_id.clone())
            .await
            .unwrap();
        assert!(soft_delete(&txn, power.base.id.value()).await.unwrap());
        txn.commit().await.unwrap();

        assert_eq!(moved, 2);
        assert_eq!(parent_of(&db, &drills).await, Some(tools.to_string_id()));
        assert_eq!(parent_of(&db, &saws).await, Some(tools.to_string_id()));
        let deleted = Entity::find_by_id(power.to_string_id()).one(&db).await.unwrap().unwrap();
        assert!(deleted.is_deleted);
        assert!(!soft_delete(&db, power.base.id.value()).await.unwrap());
    }

    #[tokio::test]
    async fn test_root_children_become_roots_and_rollback_keeps_tree() {
        let db = test_connection().await;
        let tools = category("Tools", None);
        let drills = category("Drills", Some(&tools));
        for c in [&tools, &drills] {
            to_active(c).insert(&db).await.unwrap();
        }

        let txn = db.begin().await.unwrap();
        reparent_children(&txn, tools.base.id.value(), None).await.unwrap();
        txn.rollback().await.unwrap();
        assert_eq!(parent_of(&db, &drills).await, Some(tools.to_string_id()));

        let txn = db.begin().await.unwrap();
        reparent_children(&txn, tools.base.id.value(), None).await.unwrap();
        soft_delete(&txn, tools.base.id.value()).await.unwrap();
        txn.commit().await.unwrap();
        assert_eq!(parent_of(&db, &drills).await, None);
    }
}
