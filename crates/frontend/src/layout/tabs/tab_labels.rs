//! Tab labels - единственный источник правды для заголовков вкладок.
//!
//! Для агрегатов берём `list_name`/`element_name` из contracts,
//! для системных вкладок - хардкод.

use contracts::domain::a001_category::aggregate::Category;
use contracts::domain::a002_attribute::aggregate::Attribute;
use contracts::domain::a003_specification::aggregate::Specification;
use contracts::domain::a004_manufacturer::aggregate::Manufacturer;
use contracts::domain::a005_supplier::aggregate::Supplier;
use contracts::domain::a006_product::aggregate::Product;
use contracts::domain::a007_warehouse::aggregate::Warehouse;
use contracts::domain::a008_servicing_area::aggregate::ServicingArea;
use contracts::domain::a010_pricing_policy::aggregate::PricingPolicy;
use contracts::domain::a011_promotion::aggregate::Promotion;
use contracts::domain::a012_supplier_pricing::aggregate::SupplierPricing;
use contracts::domain::a013_pricing_rule::aggregate::PricingRule;
use contracts::domain::common::AggregateRoot;

const DETAIL_MARKER: &str = "_detail_";
const NEW_ID: &str = "new";

/// Заголовок вкладки списка; пустая строка для неизвестного ключа
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "a001_category" => Category::list_name(),
        "a002_attribute" => Attribute::list_name(),
        "a003_specification" => Specification::list_name(),
        "a004_manufacturer" => Manufacturer::list_name(),
        "a005_supplier" => Supplier::list_name(),
        "a006_product" => Product::list_name(),
        "a007_warehouse" => Warehouse::list_name(),
        "a008_servicing_area" => ServicingArea::list_name(),
        "a009_inventory" => "Inventory",
        "a010_pricing_policy" => PricingPolicy::list_name(),
        "a011_promotion" => Promotion::list_name(),
        "a012_supplier_pricing" => SupplierPricing::list_name(),
        "a013_pricing_rule" => PricingRule::list_name(),
        "sys_logs" => "System log",
        _ => "",
    }
}

/// element_name агрегата по ключу списка (для detail-вкладок)
pub fn entity_element_name(aggregate_key: &str) -> &'static str {
    match aggregate_key {
        "a001_category" => Category::element_name(),
        "a002_attribute" => Attribute::element_name(),
        "a003_specification" => Specification::element_name(),
        "a004_manufacturer" => Manufacturer::element_name(),
        "a005_supplier" => Supplier::element_name(),
        "a006_product" => Product::element_name(),
        "a007_warehouse" => Warehouse::element_name(),
        "a008_servicing_area" => ServicingArea::element_name(),
        "a009_inventory" => "Stock record",
        "a010_pricing_policy" => PricingPolicy::element_name(),
        "a011_promotion" => Promotion::element_name(),
        "a012_supplier_pricing" => SupplierPricing::element_name(),
        "a013_pricing_rule" => PricingRule::element_name(),
        _ => "",
    }
}

/// Ключ detail-вкладки: `a006_product_detail_<id>` или `..._detail_new`
pub fn detail_key(aggregate_key: &str, id: Option<&str>) -> String {
    format!("{}{}{}", aggregate_key, DETAIL_MARKER, id.unwrap_or(NEW_ID))
}

/// Разбор ключа detail-вкладки на (ключ агрегата, id); `new` даёт `None`
pub fn parse_detail_key(key: &str) -> Option<(&str, Option<String>)> {
    let pos = key.find(DETAIL_MARKER)?;
    let aggregate_key = &key[..pos];
    let id = &key[pos + DETAIL_MARKER.len()..];
    if aggregate_key.is_empty() || id.is_empty() {
        return None;
    }
    let id = if id == NEW_ID {
        None
    } else {
        Some(id.to_string())
    };
    Some((aggregate_key, id))
}

/// Заголовок detail-вкладки: «<entity> · <identifier>»
pub fn detail_tab_label(entity_label: &str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

/// Заголовок карточки; пустое наименование - новая запись
pub fn detail_title(entity_label: &str, name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        format!("New {}", entity_label.to_lowercase())
    } else {
        detail_tab_label(entity_label, name)
    }
}

/// Заголовок для произвольного ключа (восстановление вкладки из URL)
pub fn title_for_key(key: &str) -> String {
    if let Some((aggregate_key, id)) = parse_detail_key(key) {
        let entity = entity_element_name(aggregate_key);
        return match id {
            Some(id) => detail_tab_label(entity, id.get(..8).unwrap_or(&id)),
            None => detail_tab_label(entity, "new"),
        };
    }
    match tab_label_for_key(key) {
        "" => key.to_string(),
        label => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_title() {
        assert_eq!(detail_title("Pricing rule", "  "), "New pricing rule");
        assert_eq!(detail_title("Product", " Drill "), "Product · Drill");
    }

    #[test]
    fn test_detail_key_roundtrip_with_new() {
        let key = detail_key("a010_pricing_policy", None);
        assert_eq!(key, "a010_pricing_policy_detail_new");
        assert_eq!(parse_detail_key(&key), Some(("a010_pricing_policy", None)));
    }

    #[test]
    fn test_parse_detail_key_with_id() {
        assert_eq!(
            parse_detail_key("a006_product_detail_5d1c"),
            Some(("a006_product", Some("5d1c".to_string())))
        );
        assert_eq!(parse_detail_key("a006_product"), None);
        assert_eq!(parse_detail_key("a006_product_detail_"), None);
    }

    #[test]
    fn test_title_for_key() {
        assert_eq!(title_for_key("a006_product"), "Products");
        assert_eq!(title_for_key("a011_promotion_detail_new"), "Promotion · new");
        assert_eq!(
            title_for_key("a006_product_detail_0123456789abcdef"),
            "Product · 01234567"
        );
        assert_eq!(title_for_key("unknown"), "unknown");
    }
}
