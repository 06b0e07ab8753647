use super::view_model::AttributeDetailsVm;
use crate::domain::a002_attribute::ui::list::data_type_label;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_title};
use crate::shared::page_frame::{DetailHeader, ErrorBox, PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::a002_attribute::aggregate::{Attribute, AttributeDataType};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn AttributeDetails(id: Option<String>, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let vm = AttributeDetailsVm::new();

    ctx.follow_tab_title(
        detail_key("a002_attribute", id.as_deref()),
        Attribute::element_name(),
        vm.description.into(),
    );
    if let Some(id) = id {
        vm.load(id);
    }

    let title = Signal::derive(move || detail_title(Attribute::element_name(), &vm.description.get()));
    let on_saved = Callback::new(move |_| {
        ctx.notify_saved();
        on_close.run(());
    });
    let is_choice = vm.is_choice();

    view! {
        <PageFrame page_id="a002_attribute--detail" category=PAGE_CAT_DETAIL>
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
                        <Input value=vm.description placeholder="Color, power, material..." />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Code"</label>
                        <Input value=vm.code placeholder="Generated when empty" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Data type"</label>
                        <select
                            class="form__input form__select"
                            prop:value=move || vm.data_type.get()
                            on:change=move |ev| vm.data_type.set(event_target_value(&ev))
                        >
                            {AttributeDataType::all()
                                .into_iter()
                                .map(|t| view! { <option value=t.as_str()>{data_type_label(t)}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Unit"</label>
                        <Input value=vm.unit placeholder="kg, W, mm..." />
                    </div>
                    <Show when=move || is_choice.get()>
                        <div class="form__group" style="grid-column: 1 / -1;">
                            <label class="form__label">"Options (comma or new line separated)"</label>
                            <Textarea value=vm.options attr:rows=5 />
                        </div>
                    </Show>
                    <div class="details-flags" style="grid-column: 1 / -1;">
                        <Checkbox checked=vm.is_filterable label="Use as catalog filter" />
                    </div>
                    <div class="form__group" style="grid-column: 1 / -1;">
                        <label class="form__label">"Comment"</label>
                        <Textarea value=vm.comment attr:rows=3 />
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}
