use super::view_model::SupplierPricingDetailsVm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_title};
use crate::shared::affected_products::AffectedProducts;
use crate::shared::dual_list_selector::DualListSelector;
use crate::shared::lookup::{label_for, load_into, lookup_items, name_map, LookupSelect};
use crate::shared::page_frame::{DetailHeader, DetailTabBar, ErrorBox, PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::a005_supplier::aggregate::Supplier;
use contracts::domain::a012_supplier_pricing::aggregate::SupplierPricing;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn SupplierPricingDetails(id: Option<String>, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let vm = SupplierPricingDetailsVm::new();

    let suppliers = RwSignal::new(Vec::<Supplier>::new());
    load_into(Supplier::collection_name(), suppliers);
    let supplier_items = Signal::derive(move || suppliers.with(|s| lookup_items(s, false)));

    // без названия вкладка подписана поставщиком
    let tab_name = Signal::derive(move || {
        let name = vm.description.get();
        if !name.trim().is_empty() {
            return name;
        }
        let supplier_id = vm.supplier_id.get();
        if supplier_id.is_empty() {
            String::new()
        } else {
            supplier_items.with(|items| label_for(&name_map(items), Some(&supplier_id)))
        }
    });

    ctx.follow_tab_title(
        detail_key("a012_supplier_pricing", id.as_deref()),
        SupplierPricing::element_name(),
        tab_name,
    );
    let terms_id = id.clone();
    if let Some(id) = id {
        vm.load(id);
    }

    let title = Signal::derive(move || detail_title(SupplierPricing::element_name(), &tab_name.get()));
    let on_saved = Callback::new(move |_| {
        ctx.notify_saved();
        on_close.run(());
    });

    let mut tabs = vec![
        ("general", Signal::derive(|| "General".to_string())),
        (
            "scope",
            Signal::derive(move || format!("Scope ({})", vm.scope.with(|s| s.len()))),
        ),
    ];
    if terms_id.is_some() {
        tabs.push(("affected", Signal::derive(|| "Affected products".to_string())));
    }

    let content = move || match (vm.active_tab.get(), terms_id.clone()) {
        ("scope", _) => view! { <DualListSelector scope=vm.scope /> }.into_any(),
        ("affected", Some(tid)) => view! {
            <AffectedProducts
                path=format!("/api/{}/{}/affected", SupplierPricing::collection_name(), tid)
                price_label="Net cost"
                against_cost=true
            />
        }
        .into_any(),
        _ => view! {
            <div class="details-section">
                <div class="details-grid--3col">
                    <div class="form__group">
                        <label class="form__label">"Supplier *"</label>
                        <LookupSelect value=vm.supplier_id options=supplier_items empty_label="(select supplier)" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Name"</label>
                        <Input value=vm.description placeholder="e.g. 2024 framework agreement" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Code"</label>
                        <Input value=vm.code placeholder="Generated when empty" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Discount, %"</label>
                        <Input value=vm.discount_percent />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Minimum order, pcs"</label>
                        <Input value=vm.min_order_qty />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Lead time, days"</label>
                        <Input value=vm.lead_time_days />
                    </div>
                    <div class="form__group">
                        <Checkbox checked=vm.is_active label="Active" />
                    </div>
                    <div class="form__group" style="grid-column: 1 / -1;">
                        <label class="form__label">"Comment"</label>
                        <Textarea value=vm.comment attr:rows=3 />
                    </div>
                </div>
            </div>
        }
        .into_any(),
    };

    view! {
        <PageFrame page_id="a012_supplier_pricing--detail" category=PAGE_CAT_DETAIL>
            <DetailHeader
                title=title
                saving=vm.saving
                save_disabled=vm.is_save_disabled()
                on_save=Callback::new(move |_| vm.save(on_saved))
                on_close=on_close
            />
            {move || vm.error.get().map(|e| view! { <ErrorBox message=e /> })}

            <DetailTabBar active=vm.active_tab tabs=tabs />
            <div class="detail-tab-content">{content}</div>
        </PageFrame>
    }
}
