use super::view_model::CategoryDetailsVm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_title};
use crate::shared::lookup::{category_options, load_into, LookupSelect};
use crate::shared::page_frame::{DetailHeader, ErrorBox, PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::a001_category::aggregate::Category;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn CategoryDetails(id: Option<String>, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let vm = CategoryDetailsVm::new();

    ctx.follow_tab_title(
        detail_key("a001_category", id.as_deref()),
        Category::element_name(),
        vm.description.into(),
    );
    if let Some(id) = id {
        vm.load(id);
    }

    // Родителем нельзя выбрать саму категорию и её потомков
    let categories = RwSignal::new(Vec::<Category>::new());
    load_into(Category::collection_name(), categories);
    let parent_items = Signal::derive(move || {
        let own = vm.id.get();
        categories.with(|c| category_options(c, own.as_deref()))
    });

    let title = Signal::derive(move || detail_title(Category::element_name(), &vm.description.get()));
    let on_saved = Callback::new(move |_| {
        ctx.notify_saved();
        on_close.run(());
    });

    view! {
        <PageFrame page_id="a001_category--detail" category=PAGE_CAT_DETAIL>
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
                        <label class="form__label">"Parent"</label>
                        <LookupSelect value=vm.parent_id options=parent_items empty_label="(root)" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Sort order"</label>
                        <Input value=vm.sort_order />
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
        </PageFrame>
    }
}
