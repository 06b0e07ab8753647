//! Какие товары попадают в область действия ценовой конструкции
//!
//! Для каждого товара строится цепочка категорий (своя + все предки),
//! дальше решает `PricingScope::matches`.

use contracts::domain::a001_category::aggregate::Category;
use contracts::domain::a006_product::aggregate::Product;
use contracts::shared::hierarchy::ancestors_of;
use contracts::shared::pricing::AffectedProduct;
use contracts::shared::scope::PricingScope;
use std::collections::HashMap;

use crate::domain::{a001_category, a006_product};

/// Категория товара и её предки, от ближней к корню
pub fn category_chain(category_id: Option<&str>, categories: &[Category]) -> Vec<String> {
    let Some(id) = category_id else {
        return Vec::new();
    };
    let mut chain = vec![id.to_string()];
    chain.extend(ancestors_of(categories, id));
    chain
}

/// Товары, совпавшие с областью действия (в порядке входного списка)
pub fn resolve<'a>(
    scope: &PricingScope,
    products: &'a [Product],
    categories: &[Category],
) -> Vec<&'a Product> {
    // Цепочки кешируем по категории: товаров обычно намного больше
    let mut chains: HashMap<Option<String>, Vec<String>> = HashMap::new();
    products
        .iter()
        .filter(|p| {
            let chain = chains
                .entry(p.category_id.clone())
                .or_insert_with(|| category_chain(p.category_id.as_deref(), categories));
            scope.matches(&p.to_string_id(), chain)
        })
        .collect()
}

/// Загрузить каталог и вычислить совпавшие товары
pub async fn resolve_products(scope: &PricingScope) -> anyhow::Result<Vec<Product>> {
    let categories = a001_category::repository::list_all().await?;
    let products = a006_product::repository::list_all().await?;
    let matched = resolve(scope, &products, &categories)
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
    tracing::debug!(
        "Scope resolved: {} of {} products",
        matched.len(),
        products.len()
    );
    Ok(matched)
}

/// Строки отчёта "затронутые товары"; `price` - цена после применения
pub fn affected_products<F>(products: &[Product], price: F) -> Vec<AffectedProduct>
where
    F: Fn(&Product) -> Option<f64>,
{
    products
        .iter()
        .map(|p| AffectedProduct {
            product_id: p.to_string_id(),
            sku: p.sku().to_string(),
            name: p.base.description.clone(),
            category_id: p.category_id.clone(),
            list_price: p.list_price,
            cost_price: p.cost_price,
            price: price(p),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_category::aggregate::CategoryDto;
    use contracts::domain::a006_product::aggregate::ProductDto;
    use contracts::shared::scope::ScopeItemKind;

    fn category(name: &str, parent: Option<&Category>) -> Category {
        Category::new_for_insert(&CategoryDto {
            description: name.into(),
            parent_id: parent.map(|p| p.to_string_id()),
            ..Default::default()
        })
    }

    fn product(sku: &str, cat: Option<&Category>) -> Product {
        Product::new_for_insert(&ProductDto {
            code: sku.into(),
            description: sku.into(),
            category_id: cat.map(|c| c.to_string_id()),
            ..Default::default()
        })
    }

    struct Catalog {
        tools: Category,
        drills: Category,
        garden: Category,
        categories: Vec<Category>,
        products: Vec<Product>,
    }

    fn catalog() -> Catalog {
        let tools = category("Tools", None);
        let drills = category("Drills", Some(&tools));
        let garden = category("Garden", None);
        let products = vec![
            product("DRILL", Some(&drills)),
            product("HAMMER", Some(&tools)),
            product("HOSE", Some(&garden)),
            product("GIFT", None),
        ];
        Catalog {
            categories: vec![tools.clone(), drills.clone(), garden.clone()],
            tools,
            drills,
            garden,
            products,
        }
    }

    fn skus(found: Vec<&Product>) -> Vec<String> {
        found.iter().map(|p| p.base.code.clone()).collect()
    }

    #[test]
    fn test_chain_walks_to_root() {
        let c = catalog();
        let chain = category_chain(Some(&c.drills.to_string_id()), &c.categories);
        assert_eq!(chain, vec![c.drills.to_string_id(), c.tools.to_string_id()]);
        assert!(category_chain(None, &c.categories).is_empty());
    }

    #[test]
    fn test_empty_scope_matches_whole_catalog() {
        let c = catalog();
        let found = resolve(&PricingScope::default(), &c.products, &c.categories);
        assert_eq!(found.len(), 4);
    }

    #[test]
    fn test_included_category_covers_subcategories() {
        let c = catalog();
        let mut scope = PricingScope::default();
        scope.include(ScopeItemKind::Category, &c.tools.to_string_id());
        assert_eq!(
            skus(resolve(&scope, &c.products, &c.categories)),
            vec!["DRILL", "HAMMER"]
        );
    }

    #[test]
    fn test_exclusion_beats_inclusion() {
        let c = catalog();
        let mut scope = PricingScope::default();
        scope.include(ScopeItemKind::Category, &c.tools.to_string_id());
        scope.exclude(ScopeItemKind::Category, &c.drills.to_string_id());
        scope.include(ScopeItemKind::Product, &c.products[2].to_string_id());
        assert_eq!(
            skus(resolve(&scope, &c.products, &c.categories)),
            vec!["HAMMER", "HOSE"]
        );
    }

    #[test]
    fn test_exclusion_only_scope() {
        let c = catalog();
        let mut scope = PricingScope::default();
        scope.exclude(ScopeItemKind::Category, &c.garden.to_string_id());
        assert_eq!(
            skus(resolve(&scope, &c.products, &c.categories)),
            vec!["DRILL", "HAMMER", "GIFT"]
        );
    }

    #[test]
    fn test_affected_rows_carry_price() {
        let c = catalog();
        let mut products = c.products.clone();
        products[0].list_price = 100.0;
        let rows = affected_products(&products[..2], |p| Some(p.list_price * 0.9));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sku, "DRILL");
        assert_eq!(rows[0].price, Some(90.0));
        assert_eq!(rows[1].category_id, Some(c.tools.to_string_id()));
    }
}
