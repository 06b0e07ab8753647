use super::view_model::SpecificationDetailsVm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_title};
use crate::shared::lookup::{category_options, load_into, LookupSelect};
use crate::shared::page_frame::{DetailHeader, ErrorBox, PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::a001_category::aggregate::Category;
use contracts::domain::a003_specification::aggregate::Specification;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn SpecificationDetails(id: Option<String>, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let vm = SpecificationDetailsVm::new();

    ctx.follow_tab_title(
        detail_key("a003_specification", id.as_deref()),
        Specification::element_name(),
        vm.description.into(),
    );
    if let Some(id) = id {
        vm.load(id);
    }

    let categories = RwSignal::new(Vec::<Category>::new());
    load_into(Category::collection_name(), categories);
    let category_items = Signal::derive(move || categories.with(|c| category_options(c, None)));

    let title =
        Signal::derive(move || detail_title(Specification::element_name(), &vm.description.get()));
    let on_saved = Callback::new(move |_| {
        ctx.notify_saved();
        on_close.run(());
    });

    view! {
        <PageFrame page_id="a003_specification--detail" category=PAGE_CAT_DETAIL>
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
                        <Input value=vm.description placeholder="Weight, voltage, warranty..." />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Code"</label>
                        <Input value=vm.code placeholder="Generated when empty" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Category"</label>
                        <LookupSelect value=vm.category_id options=category_items empty_label="(any category)" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Unit"</label>
                        <Input value=vm.unit />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Sort order"</label>
                        <Input value=vm.sort_order />
                    </div>
                    <div class="details-flags" style="grid-column: 1 / -1;">
                        <Checkbox checked=vm.is_required label="Required for products of the category" />
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
