use super::view_model::ManufacturerDetailsVm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_title};
use crate::shared::page_frame::{DetailHeader, ErrorBox, PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::a004_manufacturer::aggregate::Manufacturer;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ManufacturerDetails(id: Option<String>, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let vm = ManufacturerDetailsVm::new();

    ctx.follow_tab_title(
        detail_key("a004_manufacturer", id.as_deref()),
        Manufacturer::element_name(),
        vm.description.into(),
    );
    if let Some(id) = id {
        vm.load(id);
    }

    let title = Signal::derive(move || detail_title(Manufacturer::element_name(), &vm.description.get()));
    let on_saved = Callback::new(move |_| {
        ctx.notify_saved();
        on_close.run(());
    });

    view! {
        <PageFrame page_id="a004_manufacturer--detail" category=PAGE_CAT_DETAIL>
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
                        <Input value=vm.description placeholder="Manufacturer name" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Code"</label>
                        <Input value=vm.code placeholder="Generated when empty" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Country"</label>
                        <Input value=vm.country />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Website"</label>
                        <Input value=vm.website placeholder="https://" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Contact e-mail"</label>
                        <Input value=vm.contact_email />
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
