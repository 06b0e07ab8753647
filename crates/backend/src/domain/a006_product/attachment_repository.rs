use contracts::domain::a006_product::attachment::{AttachmentKind, ProductAttachment};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryFilter, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a006_product_attachment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub product_id: String,
    pub kind: String,
    pub sort_order: i32,
    /// JSON данных вложения (с полем `kind`)
    pub payload: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for ProductAttachment {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let payload = serde_json::from_str(&m.payload)
            .map_err(|e| anyhow::anyhow!("attachment {}: bad payload: {}", m.id, e))?;
        Ok(ProductAttachment {
            id: m.id,
            product_id: m.product_id,
            sort_order: m.sort_order,
            payload,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

fn to_active(att: &ProductAttachment) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(att.id.clone()),
        product_id: Set(att.product_id.clone()),
        kind: Set(att.kind().as_str().to_string()),
        sort_order: Set(att.sort_order),
        payload: Set(serde_json::to_string(&att.payload)?),
        created_at: Set(att.created_at),
        updated_at: Set(att.updated_at),
    })
}

fn collect(rows: Vec<Model>) -> Vec<ProductAttachment> {
    rows.into_iter()
        .filter_map(|m| match ProductAttachment::try_from(m) {
            Ok(a) => Some(a),
            Err(e) => {
                tracing::warn!("Skipping attachment: {}", e);
                None
            }
        })
        .collect()
}

/// Вложения товара (опционально одного вида), по sort_order
pub async fn list_for_product<C: ConnectionTrait>(
    db: &C,
    product_id: &str,
    kind: Option<AttachmentKind>,
) -> anyhow::Result<Vec<ProductAttachment>> {
    let mut query = Entity::find().filter(Column::ProductId.eq(product_id));
    if let Some(kind) = kind {
        query = query.filter(Column::Kind.eq(kind.as_str()));
    }
    let rows = query
        .order_by_asc(Column::Kind)
        .order_by_asc(Column::SortOrder)
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(collect(rows))
}

pub async fn get_by_id<C: ConnectionTrait>(
    db: &C,
    id: &str,
) -> anyhow::Result<Option<ProductAttachment>> {
    match Entity::find_by_id(id.to_string()).one(db).await? {
        Some(m) => Ok(Some(ProductAttachment::try_from(m)?)),
        None => Ok(None),
    }
}

pub async fn insert<C: ConnectionTrait>(db: &C, att: &ProductAttachment) -> anyhow::Result<()> {
    to_active(att)?.insert(db).await?;
    Ok(())
}

pub async fn update<C: ConnectionTrait>(db: &C, att: &ProductAttachment) -> anyhow::Result<()> {
    let mut active = to_active(att)?;
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(db).await?;
    Ok(())
}

/// Жёсткое удаление
pub async fn delete<C: ConnectionTrait>(db: &C, id: &str) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

pub async fn delete_many<C: ConnectionTrait>(db: &C, ids: &[String]) -> anyhow::Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let result = Entity::delete_many()
        .filter(Column::Id.is_in(ids.iter().cloned()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_connection;
    use chrono::Utc;
    use contracts::domain::a006_product::attachment::{AttachmentPayload, HighlightPayload};

    fn feature(product_id: &str, title: &str, sort_order: i32) -> ProductAttachment {
        ProductAttachment {
            id: uuid::Uuid::new_v4().to_string(),
            product_id: product_id.into(),
            sort_order,
            payload: AttachmentPayload::Feature(HighlightPayload {
                title: title.into(),
                body: String::new(),
            }),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_list_delete() {
        let db = test_connection().await;
        let second = feature("p1", "Brushless motor", 2);
        let first = feature("p1", "Two batteries", 1);
        insert(&db, &second).await.unwrap();
        insert(&db, &first).await.unwrap();
        insert(&db, &feature("p2", "Other", 0)).await.unwrap();

        let list = list_for_product(&db, "p1", Some(AttachmentKind::Feature))
            .await
            .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, first.id);
        assert_eq!(list[0].payload, first.payload);

        assert!(list_for_product(&db, "p1", Some(AttachmentKind::Image))
            .await
            .unwrap()
            .is_empty());

        assert!(delete(&db, &first.id).await.unwrap());
        assert!(!delete(&db, &first.id).await.unwrap());
        assert_eq!(delete_many(&db, &[second.id.clone()]).await.unwrap(), 1);
        assert!(list_for_product(&db, "p1", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_payload() {
        let db = test_connection().await;
        let mut att = feature("p1", "Old", 0);
        insert(&db, &att).await.unwrap();
        att.payload = AttachmentPayload::Feature(HighlightPayload {
            title: "New".into(),
            body: "b".into(),
        });
        update(&db, &att).await.unwrap();
        let loaded = get_by_id(&db, &att.id).await.unwrap().unwrap();
        assert_eq!(loaded.payload, att.payload);
    }
}
