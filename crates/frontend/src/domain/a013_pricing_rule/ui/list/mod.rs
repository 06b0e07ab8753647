use super::labels::{formula_text, rounding_label};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::components::badge::ActiveBadge;
use crate::shared::components::selection::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::dual_list_selector::model::scope_summary;
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{filter_list, SearchInput, Searchable};
use crate::shared::page_frame::{ErrorBox, ListHeader, PageFrame, PAGE_CAT_LIST};
use contracts::domain::a013_pricing_rule::aggregate::PricingRule;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

impl Searchable for PricingRule {
    fn search_haystack(&self) -> String {
        format!("{} {}", self.base.code, self.base.description)
    }
}

/// Правило с большим приоритетом перекрывает остальные
fn order_by_priority(rows: &mut [PricingRule]) {
    rows.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.base.description.cmp(&b.base.description))
    });
}

#[component]
pub fn PricingRuleList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let state = ListState::<PricingRule>::new(PricingRule::collection_name()).bind(ctx);

    let visible = Signal::derive(move || {
        let mut rows = filter_list(state.items.get(), &state.filter.get());
        order_by_priority(&mut rows);
        rows
    });
    let visible_ids =
        Signal::derive(move || visible.get().iter().map(|p| p.to_string_id()).collect::<Vec<_>>());

    let open_detail = move |id: Option<String>, name: &str| {
        let title = detail_tab_label(PricingRule::element_name(), name);
        ctx.open_tab(&detail_key("a013_pricing_rule", id.as_deref()), &title);
    };

    view! {
        <PageFrame page_id="a013_pricing_rule--list" category=PAGE_CAT_LIST>
            <ListHeader title=PricingRule::list_name()>
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
                <SearchInput value=state.filter placeholder="Code, name..." />
            </div>

            {move || state.error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCheckbox ids=visible_ids selected=state.selected />
                            <TableHeaderCell>"Code"</TableHeaderCell>
                            <TableHeaderCell>"Name"</TableHeaderCell>
                            <TableHeaderCell>"Formula"</TableHeaderCell>
                            <TableHeaderCell>"Priority"</TableHeaderCell>
                            <TableHeaderCell>"Rounding"</TableHeaderCell>
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
                                view! {
                                    <TableRow>
                                        <TableCellCheckbox item_id=id selected=state.selected />
                                        <TableCell>
                                            <TableCellLayout truncate=true>{p.base.code.clone()}</TableCellLayout>
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
                                            <TableCellLayout>{formula_text(p.price_base, p.markup_percent)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{p.priority}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{rounding_label(p.rounding)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{scope_summary(&p.scope)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <ActiveBadge is_active=p.is_active />
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
    use contracts::domain::a013_pricing_rule::aggregate::PricingRuleDto;

    fn rule(name: &str, priority: i32) -> PricingRule {
        PricingRule::new_for_insert(&PricingRuleDto {
            description: name.into(),
            markup_percent: 20.0,
            priority,
            ..Default::default()
        })
    }

    #[test]
    fn test_higher_priority_first() {
        let mut rows = vec![rule("Power tools", 0), rule("Accessories", 0), rule("Clearance", 10)];
        order_by_priority(&mut rows);
        let codes: Vec<_> = rows.iter().map(|r| r.base.description.clone()).collect();
        assert_eq!(codes, vec!["Clearance", "Accessories", "Power tools"]);
    }
}
