use super::view_model::WarehouseDetailsVm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_title};
use crate::shared::lookup::{load_into, lookup_items};
use crate::shared::page_frame::{DetailHeader, ErrorBox, PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::a007_warehouse::aggregate::Warehouse;
use contracts::domain::a008_servicing_area::aggregate::ServicingArea;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn WarehouseDetails(id: Option<String>, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let vm = WarehouseDetailsVm::new();

    ctx.follow_tab_title(
        detail_key("a007_warehouse", id.as_deref()),
        Warehouse::element_name(),
        vm.description.into(),
    );
    if let Some(id) = id {
        vm.load(id);
    }

    let areas = RwSignal::new(Vec::<ServicingArea>::new());
    load_into(ServicingArea::collection_name(), areas);
    let area_items = Signal::derive(move || areas.with(|a| lookup_items(a, true)));

    let title = Signal::derive(move || detail_title(Warehouse::element_name(), &vm.description.get()));
    let on_saved = Callback::new(move |_| {
        ctx.notify_saved();
        on_close.run(());
    });

    view! {
        <PageFrame page_id="a007_warehouse--detail" category=PAGE_CAT_DETAIL>
            <DetailHeader
                title=title
                saving=vm.saving
                save_disabled=vm.is_save_disabled()
                on_save=Callback::new(move |_| vm.save(on_saved))
                on_close=on_close
            />
            {move || vm.error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="details-section">
                <h4 class="details-section__title">"General"</h4>
                <div class="details-grid--3col">
                    <div class="form__group" style="grid-column: 1 / -1;">
                        <label class="form__label">"Name *"</label>
                        <Input value=vm.description />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Code"</label>
                        <Input value=vm.code placeholder="Generated when empty" />
                    </div>
                    <div class="form__group" style="grid-column: span 2;">
                        <label class="form__label">"Address"</label>
                        <Input value=vm.address />
                    </div>
                    <div class="details-flags" style="grid-column: 1 / -1;">
                        <Checkbox checked=vm.is_active label="Active" />
                    </div>
                    <div class="form__group" style="grid-column: 1 / -1;">
                        <label class="form__label">"Comment"</label>
                        <Textarea value=vm.comment attr:rows=3 />
                    </div>
                </div>
            </div>

            <div class="details-section">
                <h4 class="details-section__title">
                    {move || format!("Servicing areas ({})", vm.servicing_area_ids.with(|ids| ids.len()))}
                </h4>
                {move || {
                    let items = area_items.get();
                    if items.is_empty() {
                        return view! { <p class="text-muted">"No servicing areas defined"</p> }.into_any();
                    }
                    items
                        .into_iter()
                        .map(|item| {
                            let id_checked = item.id.clone();
                            let id_toggle = item.id.clone();
                            view! {
                                <label class="checkbox-row">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || vm.has_area(&id_checked)
                                        on:change=move |_| vm.toggle_area(&id_toggle)
                                    />
                                    <span>{item.label}</span>
                                </label>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </div>
        </PageFrame>
    }
}
