use super::super::labels::{price_base_label, rounding_label, PRICE_BASES, ROUNDINGS};
use super::view_model::PricingRuleDetailsVm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_title};
use crate::shared::affected_products::AffectedProducts;
use crate::shared::dual_list_selector::DualListSelector;
use crate::shared::page_frame::{DetailHeader, DetailTabBar, ErrorBox, PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::a013_pricing_rule::aggregate::PricingRule;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

#[component]
fn RuleForm(vm: PricingRuleDetailsVm) -> impl IntoView {
    let example = vm.example();
    view! {
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
                    <label class="form__label">"Price base"</label>
                    <select
                        class="form__input form__select"
                        prop:value=move || vm.price_base.get()
                        on:change=move |ev| vm.price_base.set(event_target_value(&ev))
                    >
                        {PRICE_BASES
                            .into_iter()
                            .map(|b| view! { <option value=b.as_str()>{price_base_label(b)}</option> })
                            .collect_view()}
                    </select>
                </div>
                <div class="form__group">
                    <label class="form__label">"Markup, %"</label>
                    <Input value=vm.markup_percent />
                </div>
                <div class="form__group">
                    <label class="form__label">"Rounding"</label>
                    <select
                        class="form__input form__select"
                        prop:value=move || vm.rounding.get()
                        on:change=move |ev| vm.rounding.set(event_target_value(&ev))
                    >
                        {ROUNDINGS
                            .into_iter()
                            .map(|r| view! { <option value=r.as_str()>{rounding_label(r)}</option> })
                            .collect_view()}
                    </select>
                </div>
                <div class="form__group">
                    <label class="form__label">"Example"</label>
                    <div class="form__static">{move || example.get()}</div>
                </div>
                <div class="form__group">
                    <label class="form__label">"Priority"</label>
                    <Input value=vm.priority />
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
}

#[component]
pub fn PricingRuleDetails(id: Option<String>, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let vm = PricingRuleDetailsVm::new();

    ctx.follow_tab_title(
        detail_key("a013_pricing_rule", id.as_deref()),
        PricingRule::element_name(),
        vm.description.into(),
    );
    let rule_id = id.clone();
    if let Some(id) = id {
        vm.load(id);
    }

    let title = Signal::derive(move || detail_title(PricingRule::element_name(), &vm.description.get()));
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
    if rule_id.is_some() {
        tabs.push(("preview", Signal::derive(|| "Price preview".to_string())));
    }

    let content = move || match (vm.active_tab.get(), rule_id.clone()) {
        ("scope", _) => view! { <DualListSelector scope=vm.scope /> }.into_any(),
        ("preview", Some(rid)) => view! {
            <AffectedProducts
                path=format!("/api/{}/{}/preview", PricingRule::collection_name(), rid)
                price_label="Calculated price"
            />
        }
        .into_any(),
        _ => view! { <RuleForm vm=vm /> }.into_any(),
    };

    view! {
        <PageFrame page_id="a013_pricing_rule--detail" category=PAGE_CAT_DETAIL>
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
