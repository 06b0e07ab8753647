use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::components::badge::{Badge, BadgeVariant};
use crate::shared::components::form_fields::{adjustment_text, period_text};
use crate::shared::components::selection::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::dual_list_selector::model::scope_summary;
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{filter_list, SearchInput, Searchable};
use crate::shared::page_frame::{ErrorBox, ListHeader, PageFrame, PAGE_CAT_LIST};
use chrono::{NaiveDate, Utc};
use contracts::domain::a011_promotion::aggregate::Promotion;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

impl Searchable for Promotion {
    fn search_haystack(&self) -> String {
        format!("{} {}", self.promo_code(), self.base.description)
    }
}

/// Состояние промо на дату
fn promo_state(promo: &Promotion, today: NaiveDate) -> (&'static str, BadgeVariant) {
    if !promo.is_active {
        ("Inactive", BadgeVariant::Neutral)
    } else if promo.starts_on.is_some_and(|s| today < s) {
        ("Scheduled", BadgeVariant::Primary)
    } else if promo.ends_on.is_some_and(|e| e < today) {
        ("Ended", BadgeVariant::Warning)
    } else {
        ("Running", BadgeVariant::Success)
    }
}

#[component]
pub fn PromotionList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let state = ListState::<Promotion>::new(Promotion::collection_name()).bind(ctx);
    let running_only = RwSignal::new(false);
    let today = Utc::now().date_naive();

    let visible = Signal::derive(move || {
        let mut rows = filter_list(state.items.get(), &state.filter.get());
        if running_only.get() {
            rows.retain(|p| p.is_running_on(today));
        }
        rows.sort_by(|a, b| a.promo_code().cmp(b.promo_code()));
        rows
    });
    let visible_ids =
        Signal::derive(move || visible.get().iter().map(|p| p.to_string_id()).collect::<Vec<_>>());

    let open_detail = move |id: Option<String>, name: &str| {
        let title = detail_tab_label(Promotion::element_name(), name);
        ctx.open_tab(&detail_key("a011_promotion", id.as_deref()), &title);
    };

    view! {
        <PageFrame page_id="a011_promotion--list" category=PAGE_CAT_LIST>
            <ListHeader title=Promotion::list_name()>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| open_detail(None, "new")>
                    {icon("plus")}
                    " New"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| state.reload()>
                    {icon("refresh")}
                    " Refresh"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || state.selected.with(|s| s.is_empty()))
                    on_click=move |_| state.delete_selected(ctx)
                >
                    {icon("delete")}
                    {move || format!(" Delete ({})", state.selected.with(|s| s.len()))}
                </Button>
            </ListHeader>

            <div class="list-toolbar">
                <SearchInput value=state.filter placeholder="Promo code, name..." />
                <Checkbox checked=running_only label="Running today" />
            </div>

            {move || state.error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCheckbox ids=visible_ids selected=state.selected />
                            <TableHeaderCell>"Promo code"</TableHeaderCell>
                            <TableHeaderCell>"Name"</TableHeaderCell>
                            <TableHeaderCell>"Discount"</TableHeaderCell>
                            <TableHeaderCell>"Period"</TableHeaderCell>
                            <TableHeaderCell>"Scope"</TableHeaderCell>
                            <TableHeaderCell>"Status"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || visible.get()
                            key=|p| (p.to_string_id(), p.base.metadata.version)
                            children=move |p| {
                                let id = p.to_string_id();
                                let id_for_link = id.clone();
                                let name = p.base.description.clone();
                                let (status, variant) = promo_state(&p, today);
                                let promo_code = p.promo_code().to_string();
                                view! {
                                    <TableRow>
                                        <TableCellCheckbox item_id=id selected=state.selected />
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                <code>{promo_code}</code>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                <a
                                                    href="#"
                                                    class="table__link"
                                                    on:click=move |e| {
                                                        e.prevent_default();
                                                        open_detail(Some(id_for_link.clone()), &name);
                                                    }
                                                >
                                                    {p.base.description.clone()}
                                                </a>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{adjustment_text(p.discount.kind, p.discount.value)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{period_text(p.starts_on, p.ends_on)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{scope_summary(&p.scope)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <Badge variant=variant>{status}</Badge>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a011_promotion::aggregate::PromotionDto;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn promo(is_active: bool) -> Promotion {
        Promotion::new_for_insert(&PromotionDto {
            code: "SPRING".into(),
            description: "Spring".into(),
            starts_on: Some(d(10)),
            ends_on: Some(d(20)),
            is_active,
            ..Default::default()
        })
    }

    #[test]
    fn test_promo_state() {
        let state = |p: &Promotion, day| promo_state(p, d(day)).0;
        assert_eq!(state(&promo(true), 5), "Scheduled");
        assert_eq!(state(&promo(true), 15), "Running");
        assert_eq!(state(&promo(true), 21), "Ended");
        assert_eq!(state(&promo(false), 15), "Inactive");
    }
}
