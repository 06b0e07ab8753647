use super::view_model::PricingPolicyDetailsVm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_title};
use crate::shared::affected_products::AffectedProducts;
use crate::shared::components::form_fields::{AdjustmentInput, DateInput};
use crate::shared::dual_list_selector::DualListSelector;
use crate::shared::page_frame::{DetailHeader, DetailTabBar, ErrorBox, PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::a010_pricing_policy::aggregate::PricingPolicy;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn PricingPolicyDetails(id: Option<String>, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let vm = PricingPolicyDetailsVm::new();

    ctx.follow_tab_title(
        detail_key("a010_pricing_policy", id.as_deref()),
        PricingPolicy::element_name(),
        vm.description.into(),
    );
    let policy_id = id.clone();
    if let Some(id) = id {
        vm.load(id);
    }

    let title =
        Signal::derive(move || detail_title(PricingPolicy::element_name(), &vm.description.get()));
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
    if policy_id.is_some() {
        tabs.push(("affected", Signal::derive(|| "Affected products".to_string())));
    }

    let content = move || match (vm.active_tab.get(), policy_id.clone()) {
        ("scope", _) => view! { <DualListSelector scope=vm.scope /> }.into_any(),
        ("affected", Some(pid)) => view! {
            <AffectedProducts
                path=format!("/api/{}/{}/affected", PricingPolicy::collection_name(), pid)
                price_label="Adjusted price"
            />
        }
        .into_any(),
        _ => view! {
            <div class="details-section">
                <div class="details-grid--3col">
                    <div class="form__group" style="grid-column: span 2;">
                        <label class="form__label">"Name *"</label>
                        <Input value=vm.description />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Code"</label>
                        <Input value=vm.code placeholder="Generated when empty" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Adjustment"</label>
                        <AdjustmentInput kind=vm.adjustment_kind value=vm.adjustment_value />
                        <span class="form__hint">"Positive lowers the price, negative raises it"</span>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Priority"</label>
                        <Input value=vm.priority />
                    </div>
                    <div class="form__group">
                        <Checkbox checked=vm.is_active label="Active" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Valid from"</label>
                        <DateInput value=vm.valid_from />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Valid to"</label>
                        <DateInput value=vm.valid_to />
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
        <PageFrame page_id="a010_pricing_policy--detail" category=PAGE_CAT_DETAIL>
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
