use super::repository;
use contracts::domain::a006_product::aggregate::{Product, ProductDto};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::{a001_category, a004_manufacturer, a005_supplier};
use crate::shared::data::db::get_connection;
use crate::shared::error::{parse_uuid, ServiceError, ServiceResult};
use crate::shared::format::format_price;
use crate::shared::logger;

/// Лимит строк в ответе поиска
const SEARCH_LIMIT: usize = 50;

/// SKU уникален среди неудалённых товаров; ссылки должны существовать
async fn check_product(aggregate: &Product) -> ServiceResult<()> {
    let id = aggregate.to_string_id();
    if repository::find_by_sku(aggregate.sku(), Some(&id))
        .await?
        .is_some()
    {
        return Err(ServiceError::Validation(format!(
            "SKU '{}' is already used by another product",
            aggregate.sku()
        )));
    }

    if let Some(category_id) = aggregate.category_id.as_deref() {
        let uuid = parse_uuid(category_id)?;
        if a001_category::repository::get_by_id(uuid).await?.is_none() {
            return Err(ServiceError::Validation(format!(
                "Category {} does not exist",
                category_id
            )));
        }
    }
    if let Some(manufacturer_id) = aggregate.manufacturer_id.as_deref() {
        let uuid = parse_uuid(manufacturer_id)?;
        if a004_manufacturer::repository::get_by_id(uuid).await?.is_none() {
            return Err(ServiceError::Validation(format!(
                "Manufacturer {} does not exist",
                manufacturer_id
            )));
        }
    }
    if let Some(supplier_id) = aggregate.supplier_id.as_deref() {
        let uuid = parse_uuid(supplier_id)?;
        if a005_supplier::repository::get_by_id(uuid).await?.is_none() {
            return Err(ServiceError::Validation(format!(
                "Supplier {} does not exist",
                supplier_id
            )));
        }
    }
    Ok(())
}

pub async fn create(dto: ProductDto) -> ServiceResult<Uuid> {
    let mut aggregate = Product::new_for_insert(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    check_product(&aggregate).await?;

    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;
    logger::log(
        "product",
        &format!("Product {} '{}' created", aggregate.sku(), aggregate.base.description),
    );
    Ok(id)
}

pub async fn update(dto: ProductDto) -> ServiceResult<()> {
    let id = parse_uuid(dto.id.as_deref().unwrap_or_default())?;
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Product"))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    check_product(&aggregate).await?;

    aggregate.before_write();
    Ok(repository::update(&aggregate).await?)
}

pub async fn delete(id: Uuid) -> ServiceResult<()> {
    if repository::soft_delete(id).await? {
        logger::log("product", &format!("Product {} deleted", id));
        Ok(())
    } else {
        Err(ServiceError::not_found("Product"))
    }
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Product> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Product"))
}

pub async fn list_all() -> ServiceResult<Vec<Product>> {
    Ok(repository::list_all().await?)
}

/// Пустой запрос возвращает пустой список
pub async fn search(q: &str) -> ServiceResult<Vec<Product>> {
    let q = q.trim();
    if q.is_empty() {
        return Ok(vec![]);
    }
    Ok(repository::search(get_connection(), q, SEARCH_LIMIT).await?)
}

/// Выгрузка всех товаров в CSV
pub async fn export_csv() -> ServiceResult<String> {
    let products = repository::list_all().await?;
    let mut names: HashMap<String, String> = HashMap::new();
    for c in a001_category::repository::list_all().await? {
        names.insert(c.to_string_id(), c.base.description);
    }
    for m in a004_manufacturer::repository::list_all().await? {
        names.insert(m.to_string_id(), m.base.description);
    }
    for s in a005_supplier::repository::list_all().await? {
        names.insert(s.to_string_id(), s.base.description);
    }

    let csv = products_to_csv(&products, &names)?;
    tracing::info!("Exported {} products to CSV", products.len());
    Ok(csv)
}

/// `names` - наименования категорий, производителей и поставщиков по id
pub fn products_to_csv(
    products: &[Product],
    names: &HashMap<String, String>,
) -> anyhow::Result<String> {
    let name_of = |id: &Option<String>| -> String {
        id.as_ref()
            .and_then(|id| names.get(id))
            .cloned()
            .unwrap_or_default()
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "sku",
        "name",
        "status",
        "category",
        "manufacturer",
        "supplier",
        "list_price",
        "cost_price",
        "barcode",
        "weight_kg",
    ])?;
    for p in products {
        writer.write_record([
            p.sku().to_string(),
            p.base.description.clone(),
            p.status.as_str().to_string(),
            name_of(&p.category_id),
            name_of(&p.manufacturer_id),
            name_of(&p.supplier_id),
            format_price(p.list_price),
            format_price(p.cost_price),
            p.barcode.clone().unwrap_or_default(),
            p.weight_kg.map(|w| w.to_string()).unwrap_or_default(),
        ])?;
    }
    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a006_product::aggregate::ProductStatus;

    fn product(sku: &str, name: &str, category: Option<&str>) -> Product {
        Product::new_for_insert(&ProductDto {
            code: sku.into(),
            description: name.into(),
            category_id: category.map(String::from),
            list_price: 19.9,
            cost_price: 12.0,
            status: ProductStatus::Active,
            ..Default::default()
        })
    }

    #[test]
    fn test_products_to_csv() {
        let names = HashMap::from([("cat-1".to_string(), "Drills".to_string())]);
        let products = vec![
            product("DR-100", "Drill, cordless", Some("cat-1")),
            product("SW-1", "Saw", None),
        ];
        let csv = products_to_csv(&products, &names).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("sku,name,status,category"));
        assert_eq!(
            lines[1],
            "DR-100,\"Drill, cordless\",active,Drills,,,19.90,12.00,,"
        );
        assert_eq!(lines[2], "SW-1,Saw,active,,,,19.90,12.00,,");
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let csv = products_to_csv(&[], &HashMap::new()).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
