use contracts::domain::a009_inventory::aggregate::{InventoryFilter, InventoryRecord};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryFilter, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a009_inventory")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub product_id: String,
    pub warehouse_id: String,
    pub quantity_on_hand: i64,
    pub quantity_reserved: i64,
    pub reorder_point: i64,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for InventoryRecord {
    fn from(m: Model) -> Self {
        InventoryRecord {
            id: m.id,
            product_id: m.product_id,
            warehouse_id: m.warehouse_id,
            quantity_on_hand: m.quantity_on_hand,
            quantity_reserved: m.quantity_reserved,
            reorder_point: m.reorder_point,
            updated_at: m.updated_at,
        }
    }
}

fn to_active(record: &InventoryRecord) -> ActiveModel {
    ActiveModel {
        id: Set(record.id.clone()),
        product_id: Set(record.product_id.clone()),
        warehouse_id: Set(record.warehouse_id.clone()),
        quantity_on_hand: Set(record.quantity_on_hand),
        quantity_reserved: Set(record.quantity_reserved),
        reorder_point: Set(record.reorder_point),
        updated_at: Set(record.updated_at),
    }
}

pub async fn list<C: ConnectionTrait>(
    db: &C,
    filter: &InventoryFilter,
) -> anyhow::Result<Vec<InventoryRecord>> {
    let mut query = Entity::find();
    if let Some(product_id) = filter.product_id.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(Column::ProductId.eq(product_id));
    }
    if let Some(warehouse_id) = filter.warehouse_id.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(Column::WarehouseId.eq(warehouse_id));
    }
    let items = query
        .order_by_asc(Column::ProductId)
        .order_by_asc(Column::WarehouseId)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id<C: ConnectionTrait>(
    db: &C,
    id: &str,
) -> anyhow::Result<Option<InventoryRecord>> {
    Ok(Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .map(Into::into))
}

/// Запись для пары товар/склад
pub async fn find_by_pair<C: ConnectionTrait>(
    db: &C,
    product_id: &str,
    warehouse_id: &str,
) -> anyhow::Result<Option<InventoryRecord>> {
    Ok(Entity::find()
        .filter(Column::ProductId.eq(product_id))
        .filter(Column::WarehouseId.eq(warehouse_id))
        .one(db)
        .await?
        .map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, record: &InventoryRecord) -> anyhow::Result<()> {
    to_active(record).insert(db).await?;
    Ok(())
}

pub async fn update<C: ConnectionTrait>(db: &C, record: &InventoryRecord) -> anyhow::Result<()> {
    to_active(record).update(db).await?;
    Ok(())
}

/// Физическое удаление
pub async fn delete<C: ConnectionTrait>(db: &C, id: &str) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_connection;
    use contracts::domain::a009_inventory::aggregate::InventoryRecordDto;

    fn record(product: &str, warehouse: &str, on_hand: i64) -> InventoryRecord {
        InventoryRecord::new_for_insert(&InventoryRecordDto {
            product_id: product.into(),
            warehouse_id: warehouse.into(),
            quantity_on_hand: on_hand,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_filter_by_product_and_warehouse() {
        let db = test_connection().await;
        for r in [record("p1", "w1", 5), record("p1", "w2", 1), record("p2", "w1", 9)] {
            insert(&db, &r).await.unwrap();
        }

        let all = list(&db, &InventoryFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let p1 = InventoryFilter {
            product_id: Some("p1".into()),
            warehouse_id: None,
        };
        assert_eq!(list(&db, &p1).await.unwrap().len(), 2);

        let pair = InventoryFilter {
            product_id: Some("p2".into()),
            warehouse_id: Some("w1".into()),
        };
        let found = list(&db, &pair).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].quantity_on_hand, 9);
    }

    #[tokio::test]
    async fn test_pair_is_unique_and_delete_is_physical() {
        let db = test_connection().await;
        let r = record("p1", "w1", 5);
        insert(&db, &r).await.unwrap();
        assert!(insert(&db, &record("p1", "w1", 7)).await.is_err());

        let mut found = find_by_pair(&db, "p1", "w1").await.unwrap().unwrap();
        assert_eq!(found.id, r.id);
        found.quantity_on_hand = 8;
        update(&db, &found).await.unwrap();
        assert_eq!(
            get_by_id(&db, &r.id).await.unwrap().unwrap().quantity_on_hand,
            8
        );

        assert!(delete(&db, &r.id).await.unwrap());
        assert!(!delete(&db, &r.id).await.unwrap());
        assert!(find_by_pair(&db, "p1", "w1").await.unwrap().is_none());
    }
}
