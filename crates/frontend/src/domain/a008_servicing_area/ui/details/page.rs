use super::view_model::ServicingAreaDetailsVm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_title};
use crate::shared::page_frame::{DetailHeader, ErrorBox, PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::a008_servicing_area::aggregate::ServicingArea;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ServicingAreaDetails(id: Option<String>, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let vm = ServicingAreaDetailsVm::new();

    ctx.follow_tab_title(
        detail_key("a008_servicing_area", id.as_deref()),
        ServicingArea::element_name(),
        vm.description.into(),
    );
    if let Some(id) = id {
        vm.load(id);
    }

    let title =
        Signal::derive(move || detail_title(ServicingArea::element_name(), &vm.description.get()));
    let on_saved = Callback::new(move |_| {
        ctx.notify_saved();
        on_close.run(());
    });
    let postal_count = vm.postal_count();

    view! {
        <PageFrame page_id="a008_servicing_area--detail" category=PAGE_CAT_DETAIL>
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
                    <div class="form__group">
                        <label class="form__label">"Region"</label>
                        <Input value=vm.region />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Delivery, days"</label>
                        <Input value=vm.delivery_days />
                    </div>
                </div>
            </div>

            <div class="details-section">
                <h4 class="details-section__title">
                    {move || format!("Postal codes ({})", postal_count.get())}
                </h4>
                <div class="form__group">
                    <Textarea
                        value=vm.postal_codes
                        placeholder="Comma or new line separated"
                        attr:rows=5
                    />
                </div>
            </div>

            <div class="details-section">
                <div class="form__group">
                    <label class="form__label">"Comment"</label>
                    <Textarea value=vm.comment attr:rows=3 />
                </div>
            </div>
        </PageFrame>
    }
}
