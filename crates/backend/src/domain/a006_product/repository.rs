use chrono::Utc;
use contracts::domain::a006_product::aggregate::{Product, ProductId, ProductStatus};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, ConnectionTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a006_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// SKU
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub category_id: Option<String>,
    pub manufacturer_id: Option<String>,
    pub supplier_id: Option<String>,
    pub list_price: f64,
    pub cost_price: f64,
    pub status: String,
    pub barcode: Option<String>,
    pub weight_kg: Option<f64>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Product {
            base: BaseAggregate::with_metadata(
                ProductId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            category_id: m.category_id,
            manufacturer_id: m.manufacturer_id,
            supplier_id: m.supplier_id,
            list_price: m.list_price,
            cost_price: m.cost_price,
            status: ProductStatus::parse(&m.status).unwrap_or_default(),
            barcode: m.barcode,
            weight_kg: m.weight_kg,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Product) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.to_string_id()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        category_id: Set(aggregate.category_id.clone()),
        manufacturer_id: Set(aggregate.manufacturer_id.clone()),
        supplier_id: Set(aggregate.supplier_id.clone()),
        list_price: Set(aggregate.list_price),
        cost_price: Set(aggregate.cost_price),
        status: Set(aggregate.status.as_str().to_string()),
        barcode: Set(aggregate.barcode.clone()),
        weight_kg: Set(aggregate.weight_kg),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all() -> anyhow::Result<Vec<Product>> {
    let mut items: Vec<Product> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by_key(|p| p.base.description.to_lowercase());
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Product>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result
        .map(Product::from)
        .filter(|p| !p.base.metadata.is_deleted))
}

/// Товар с таким SKU (кроме `except_id`)
pub async fn find_by_sku(sku: &str, except_id: Option<&str>) -> anyhow::Result<Option<Product>> {
    let mut query = Entity::find()
        .filter(Column::Code.eq(sku))
        .filter(Column::IsDeleted.eq(false));
    if let Some(id) = except_id {
        query = query.filter(Column::Id.ne(id));
    }
    Ok(query.one(conn()).await?.map(Into::into))
}

/// Совпадение подстроки в SKU, наименовании или штрихкоде без учёта регистра
///
/// Сравнение в Rust: SQLite LIKE не понижает регистр не-ASCII и трактует `%`/`_` как шаблон.
pub fn matches_query(product: &Product, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    [
        Some(product.base.code.as_str()),
        Some(product.base.description.as_str()),
        product.barcode.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Поиск по SKU, наименованию и штрихкоду
pub async fn search<C: ConnectionTrait>(
    db: &C,
    q: &str,
    limit: usize,
) -> anyhow::Result<Vec<Product>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::Description)
        .all(db)
        .await?
        .into_iter()
        .map(Product::from)
        .filter(|p| matches_query(p, q))
        .take(limit)
        .collect();
    Ok(items)
}

pub async fn insert(aggregate: &Product) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Product) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_connection;
    use contracts::domain::a006_product::aggregate::ProductDto;

    fn product(sku: &str, name: &str, barcode: Option<&str>) -> Product {
        Product::new_for_insert(&ProductDto {
            code: sku.into(),
            description: name.into(),
            barcode: barcode.map(String::from),
            ..Default::default()
        })
    }

    async fn seed(db: &DatabaseConnection) {
        for p in [
            product("DRL-18V", "Дрель ударная", Some("4601234567890")),
            product("SAW-200", "Circular saw", None),
            product("BIT_SET", "Drill bit set", None),
        ] {
            to_active(&p).insert(db).await.unwrap();
        }
        let mut gone = product("OLD-1", "Old drill", None);
        gone.base.metadata.is_deleted = true;
        to_active(&gone).insert(db).await.unwrap();
    }

    fn skus(items: &[Product]) -> Vec<&str> {
        items.iter().map(|p| p.base.code.as_str()).collect()
    }

    #[tokio::test]
    async fn test_search_ignores_case_including_cyrillic() {
        let db = test_connection().await;
        seed(&db).await;

        assert_eq!(skus(&search(&db, "дрель", 50).await.unwrap()), vec!["DRL-18V"]);
        assert_eq!(skus(&search(&db, "ДРЕЛЬ", 50).await.unwrap()), vec!["DRL-18V"]);
        assert_eq!(skus(&search(&db, "saw-2", 50).await.unwrap()), vec!["SAW-200"]);
        assert_eq!(skus(&search(&db, "567890", 50).await.unwrap()), vec!["DRL-18V"]);
        assert_eq!(skus(&search(&db, "drill", 50).await.unwrap()), vec!["BIT_SET"]);
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally_and_limits() {
        let db = test_connection().await;
        seed(&db).await;

        assert_eq!(skus(&search(&db, "_", 50).await.unwrap()), vec!["BIT_SET"]);
        assert!(search(&db, "%", 50).await.unwrap().is_empty());
        assert_eq!(search(&db, "-", 1).await.unwrap().len(), 1);
    }
}
