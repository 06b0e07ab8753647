//! Tab content registry - единственное место, где tab.key превращается во View

use super::tab_labels::parse_detail_key;
use crate::domain::a001_category::ui::details::CategoryDetails;
use crate::domain::a001_category::ui::tree::CategoryTree;
use crate::domain::a002_attribute::ui::details::AttributeDetails;
use crate::domain::a002_attribute::ui::list::AttributeList;
use crate::domain::a003_specification::ui::details::SpecificationDetails;
use crate::domain::a003_specification::ui::list::SpecificationList;
use crate::domain::a004_manufacturer::ui::details::ManufacturerDetails;
use crate::domain::a004_manufacturer::ui::list::ManufacturerList;
use crate::domain::a005_supplier::ui::details::SupplierDetails;
use crate::domain::a005_supplier::ui::list::SupplierList;
use crate::domain::a006_product::ui::details::ProductDetails;
use crate::domain::a006_product::ui::list::ProductList;
use crate::domain::a007_warehouse::ui::details::WarehouseDetails;
use crate::domain::a007_warehouse::ui::list::WarehouseList;
use crate::domain::a008_servicing_area::ui::details::ServicingAreaDetails;
use crate::domain::a008_servicing_area::ui::list::ServicingAreaList;
use crate::domain::a009_inventory::ui::details::InventoryDetails;
use crate::domain::a009_inventory::ui::list::InventoryList;
use crate::domain::a010_pricing_policy::ui::details::PricingPolicyDetails;
use crate::domain::a010_pricing_policy::ui::list::PricingPolicyList;
use crate::domain::a011_promotion::ui::details::PromotionDetails;
use crate::domain::a011_promotion::ui::list::PromotionList;
use crate::domain::a012_supplier_pricing::ui::details::SupplierPricingDetails;
use crate::domain::a012_supplier_pricing::ui::list::SupplierPricingList;
use crate::domain::a013_pricing_rule::ui::details::PricingRuleDetails;
use crate::domain::a013_pricing_rule::ui::list::PricingRuleList;
use crate::layout::global_context::AppGlobalContext;
use crate::system::logs::ui::LogList;
use leptos::prelude::*;

/// Рендерит контент вкладки по её ключу.
///
/// * `key` - ключ вкладки (`a006_product`, `a006_product_detail_<id>`, `a010_pricing_policy_detail_new`)
/// * `tabs_store` - нужен detail-страницам, чтобы закрыть свою вкладку
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    if let Some((aggregate_key, id)) = parse_detail_key(key) {
        let key_for_close = key.to_string();
        let on_close = Callback::new(move |_| tabs_store.close_tab(&key_for_close));
        return render_detail(aggregate_key, id, on_close);
    }

    match key {
        // Catalog
        "a001_category" => view! { <CategoryTree /> }.into_any(),
        "a002_attribute" => view! { <AttributeList /> }.into_any(),
        "a003_specification" => view! { <SpecificationList /> }.into_any(),
        "a006_product" => view! { <ProductList /> }.into_any(),

        // Partners
        "a004_manufacturer" => view! { <ManufacturerList /> }.into_any(),
        "a005_supplier" => view! { <SupplierList /> }.into_any(),

        // Logistics
        "a007_warehouse" => view! { <WarehouseList /> }.into_any(),
        "a008_servicing_area" => view! { <ServicingAreaList /> }.into_any(),
        "a009_inventory" => view! { <InventoryList /> }.into_any(),

        // Pricing
        "a010_pricing_policy" => view! { <PricingPolicyList /> }.into_any(),
        "a011_promotion" => view! { <PromotionList /> }.into_any(),
        "a012_supplier_pricing" => view! { <SupplierPricingList /> }.into_any(),
        "a013_pricing_rule" => view! { <PricingRuleList /> }.into_any(),

        // System
        "sys_logs" => view! { <LogList /> }.into_any(),

        _ => unknown(key),
    }
}

fn render_detail(aggregate_key: &str, id: Option<String>, on_close: Callback<()>) -> AnyView {
    match aggregate_key {
        "a001_category" => view! { <CategoryDetails id=id on_close=on_close /> }.into_any(),
        "a002_attribute" => view! { <AttributeDetails id=id on_close=on_close /> }.into_any(),
        "a003_specification" => {
            view! { <SpecificationDetails id=id on_close=on_close /> }.into_any()
        }
        "a004_manufacturer" => {
            view! { <ManufacturerDetails id=id on_close=on_close /> }.into_any()
        }
        "a005_supplier" => view! { <SupplierDetails id=id on_close=on_close /> }.into_any(),
        "a006_product" => view! { <ProductDetails id=id on_close=on_close /> }.into_any(),
        "a007_warehouse" => view! { <WarehouseDetails id=id on_close=on_close /> }.into_any(),
        "a008_servicing_area" => {
            view! { <ServicingAreaDetails id=id on_close=on_close /> }.into_any()
        }
        "a009_inventory" => view! { <InventoryDetails id=id on_close=on_close /> }.into_any(),
        "a010_pricing_policy" => {
            view! { <PricingPolicyDetails id=id on_close=on_close /> }.into_any()
        }
        "a011_promotion" => view! { <PromotionDetails id=id on_close=on_close /> }.into_any(),
        "a012_supplier_pricing" => {
            view! { <SupplierPricingDetails id=id on_close=on_close /> }.into_any()
        }
        "a013_pricing_rule" => {
            view! { <PricingRuleDetails id=id on_close=on_close /> }.into_any()
        }
        other => unknown(other),
    }
}

fn unknown(key: &str) -> AnyView {
    log::warn!("Unknown tab type: {}", key);
    view! { <div class="placeholder">{format!("Unknown tab: {}", key)}</div> }.into_any()
}
