use super::attachments::{AttachmentLookups, AttachmentPanel};
use super::view_model::ProductDetailsVm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_title};
use crate::shared::lookup::{category_options, load_into, lookup_items, LookupItem, LookupSelect};
use crate::shared::page_frame::{DetailHeader, DetailTabBar, ErrorBox, PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::a001_category::aggregate::Category;
use contracts::domain::a002_attribute::aggregate::Attribute;
use contracts::domain::a003_specification::aggregate::Specification;
use contracts::domain::a004_manufacturer::aggregate::Manufacturer;
use contracts::domain::a005_supplier::aggregate::Supplier;
use contracts::domain::a006_product::aggregate::{Product, ProductStatus};
use contracts::domain::a006_product::attachment::AttachmentKind;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

const GENERAL_TAB: &str = "general";

#[component]
fn GeneralTab(vm: ProductDetailsVm) -> impl IntoView {
    let categories = RwSignal::new(Vec::<Category>::new());
    let manufacturers = RwSignal::new(Vec::<Manufacturer>::new());
    let suppliers = RwSignal::new(Vec::<Supplier>::new());
    load_into(Category::collection_name(), categories);
    load_into(Manufacturer::collection_name(), manufacturers);
    load_into(Supplier::collection_name(), suppliers);

    let category_items = Signal::derive(move || categories.with(|c| category_options(c, None)));
    let manufacturer_items = Signal::derive(move || manufacturers.with(|m| lookup_items(m, false)));
    let supplier_items = Signal::derive(move || suppliers.with(|s| lookup_items(s, false)));
    let margin = vm.margin();

    view! {
        <div class="details-section">
            <h4 class="details-section__title">"General"</h4>
            <div class="details-grid--3col">
                <div class="form__group">
                    <label class="form__label">"SKU *"</label>
                    <Input value=vm.code />
                </div>
                <div class="form__group" style="grid-column: span 2;">
                    <label class="form__label">"Name *"</label>
                    <Input value=vm.description />
                </div>
                <div class="form__group">
                    <label class="form__label">"Category"</label>
                    <LookupSelect value=vm.category_id options=category_items />
                </div>
                <div class="form__group">
                    <label class="form__label">"Manufacturer"</label>
                    <LookupSelect value=vm.manufacturer_id options=manufacturer_items />
                </div>
                <div class="form__group">
                    <label class="form__label">"Supplier"</label>
                    <LookupSelect value=vm.supplier_id options=supplier_items />
                </div>
                <div class="form__group">
                    <label class="form__label">"Status"</label>
                    <select
                        class="form__input form__select"
                        prop:value=move || vm.status.get()
                        on:change=move |ev| vm.status.set(event_target_value(&ev))
                    >
                        {ProductStatus::all()
                            .into_iter()
                            .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                            .collect_view()}
                    </select>
                </div>
                <div class="form__group">
                    <label class="form__label">"Barcode"</label>
                    <Input value=vm.barcode />
                </div>
                <div class="form__group">
                    <label class="form__label">"Weight, kg"</label>
                    <Input value=vm.weight_kg />
                </div>
            </div>
        </div>

        <div class="details-section">
            <h4 class="details-section__title">"Prices"</h4>
            <div class="details-grid--3col">
                <div class="form__group">
                    <label class="form__label">"List price"</label>
                    <Input value=vm.list_price />
                </div>
                <div class="form__group">
                    <label class="form__label">"Cost price"</label>
                    <Input value=vm.cost_price />
                </div>
                <div class="form__group">
                    <label class="form__label">"Margin"</label>
                    <div class="form__static">{move || margin.get()}</div>
                </div>
            </div>
        </div>

        <div class="details-section">
            <div class="form__group">
                <label class="form__label">"Comment"</label>
                <Textarea value=vm.comment attr:rows=3 />
            </div>
        </div>
    }
}

/// Карточка товара: основные поля и вкладки вложений
#[component]
pub fn ProductDetails(id: Option<String>, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let vm = ProductDetailsVm::new();

    ctx.follow_tab_title(
        detail_key("a006_product", id.as_deref()),
        Product::element_name(),
        vm.description.into(),
    );
    let product_id = id.clone();
    if let Some(id) = id {
        vm.load(id);
    }

    let products = RwSignal::new(Vec::<Product>::new());
    let specifications = RwSignal::new(Vec::<Specification>::new());
    let attributes = RwSignal::new(Vec::<Attribute>::new());
    let lookups = AttachmentLookups {
        products: Signal::derive(move || products.with(|p| lookup_items(p, true))),
        specifications: Signal::derive(move || {
            specifications.with(|list| {
                let mut items: Vec<_> = list
                    .iter()
                    .map(|s| LookupItem {
                        id: s.to_string_id(),
                        label: s.label(),
                    })
                    .collect();
                items.sort_by_key(|i| i.label.to_lowercase());
                items
            })
        }),
        attributes,
    };
    if product_id.is_some() {
        load_into(Product::collection_name(), products);
        load_into(Specification::collection_name(), specifications);
        load_into(Attribute::collection_name(), attributes);
    }

    let title = Signal::derive(move || detail_title(Product::element_name(), &vm.description.get()));
    let on_saved = Callback::new(move |_| {
        ctx.notify_saved();
        on_close.run(());
    });
    let on_attachments_changed = Callback::new(move |_| vm.reload_attachments());

    let mut tabs = vec![(GENERAL_TAB, Signal::derive(|| "General".to_string()))];
    if product_id.is_some() {
        for kind in AttachmentKind::all() {
            let items = vm.attachments_of(kind);
            tabs.push((
                kind.as_str(),
                Signal::derive(move || match items.with(|i| i.len()) {
                    0 => kind.title().to_string(),
                    n => format!("{} ({})", kind.title(), n),
                }),
            ));
        }
    }

    let content = move || {
        let active = vm.active_tab.get();
        if active == GENERAL_TAB {
            return view! { <GeneralTab vm=vm /> }.into_any();
        }
        match (AttachmentKind::parse(active), product_id.clone()) {
            (Some(kind), Some(pid)) => view! {
                <AttachmentPanel
                    product_id=pid
                    product_name=vm.description
                    kind=kind
                    items=vm.attachments_of(kind)
                    lookups=lookups
                    on_changed=on_attachments_changed
                />
            }
            .into_any(),
            _ => view! { <GeneralTab vm=vm /> }.into_any(),
        }
    };

    view! {
        <PageFrame page_id="a006_product--detail" category=PAGE_CAT_DETAIL>
            <DetailHeader
                title=title
                saving=vm.saving
                save_disabled=vm.is_save_disabled()
                on_save=Callback::new(move |_| vm.save(on_saved))
                on_close=on_close
            />
            {move || vm.error.get().map(|e| view! { <ErrorBox message=e /> })}

            <DetailTabBar active=vm.active_tab tabs=tabs />
            <Show when=move || vm.id.with(|i| i.is_none())>
                <p class="text-muted">"Save the product to add images, descriptions and other records."</p>
            </Show>

            <div class="detail-tab-content">{content}</div>
        </PageFrame>
    }
}
