use super::view_model::InventoryDetailsVm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_title};
use crate::shared::lookup::{label_for, load_into, lookup_items, name_map, LookupSelect};
use crate::shared::page_frame::{DetailHeader, ErrorBox, PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::a006_product::aggregate::Product;
use contracts::domain::a007_warehouse::aggregate::Warehouse;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

const ENTITY_LABEL: &str = "Stock record";

#[component]
pub fn InventoryDetails(id: Option<String>, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let vm = InventoryDetailsVm::new();

    let products = RwSignal::new(Vec::<Product>::new());
    let warehouses = RwSignal::new(Vec::<Warehouse>::new());
    load_into(Product::collection_name(), products);
    load_into(Warehouse::collection_name(), warehouses);
    let product_items = Signal::derive(move || products.with(|p| lookup_items(p, true)));
    let warehouse_items = Signal::derive(move || warehouses.with(|w| lookup_items(w, false)));

    // «Товар @ Склад», пока оба не выбраны - пусто
    let record_name = Signal::derive(move || {
        let (product_id, warehouse_id) = (vm.product_id.get(), vm.warehouse_id.get());
        if product_id.is_empty() || warehouse_id.is_empty() {
            return String::new();
        }
        let product = product_items.with(|items| label_for(&name_map(items), Some(&product_id)));
        let warehouse =
            warehouse_items.with(|items| label_for(&name_map(items), Some(&warehouse_id)));
        format!("{} @ {}", product, warehouse)
    });

    ctx.follow_tab_title(
        detail_key("a009_inventory", id.as_deref()),
        ENTITY_LABEL,
        record_name,
    );
    if let Some(id) = id {
        vm.load(id);
    }

    let title = Signal::derive(move || detail_title(ENTITY_LABEL, &record_name.get()));
    let on_saved = Callback::new(move |_| {
        ctx.notify_saved();
        on_close.run(());
    });
    let is_new = vm.is_new();
    let available = vm.available();

    view! {
        <PageFrame page_id="a009_inventory--detail" category=PAGE_CAT_DETAIL>
            <DetailHeader
                title=title
                saving=vm.saving
                save_disabled=vm.is_save_disabled()
                on_save=Callback::new(move |_| vm.save(on_saved))
                on_close=on_close
            />
            {move || vm.error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="details-section">
                <h4 class="details-section__title">"Location"</h4>
                <div class="details-grid--3col">
                    <div class="form__group" style="grid-column: span 2;">
                        <label class="form__label">"Product *"</label>
                        <Show
                            when=move || is_new.get()
                            fallback=move || view! {
                                <div class="form__static">{move || {
                                    let id = vm.product_id.get();
                                    product_items.with(|items| label_for(&name_map(items), Some(&id)))
                                }}</div>
                            }
                        >
                            <LookupSelect value=vm.product_id options=product_items empty_label="(select product)" />
                        </Show>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Warehouse *"</label>
                        <Show
                            when=move || is_new.get()
                            fallback=move || view! {
                                <div class="form__static">{move || {
                                    let id = vm.warehouse_id.get();
                                    warehouse_items.with(|items| label_for(&name_map(items), Some(&id)))
                                }}</div>
                            }
                        >
                            <LookupSelect value=vm.warehouse_id options=warehouse_items empty_label="(select warehouse)" />
                        </Show>
                    </div>
                </div>
            </div>

            <div class="details-section">
                <h4 class="details-section__title">"Quantities"</h4>
                <div class="details-grid--3col">
                    <div class="form__group">
                        <label class="form__label">"On hand"</label>
                        <Input value=vm.quantity_on_hand />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Reserved"</label>
                        <Input value=vm.quantity_reserved />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Reorder point"</label>
                        <Input value=vm.reorder_point />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Available"</label>
                        <div class="form__static">{move || available.get()}</div>
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}
