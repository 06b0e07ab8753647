use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::components::badge::ActiveBadge;
use crate::shared::components::form_fields::{adjustment_text, period_text};
use crate::shared::components::selection::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::dual_list_selector::model::scope_summary;
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{filter_list, SearchInput, Searchable};
use crate::shared::page_frame::{ErrorBox, ListHeader, PageFrame, PAGE_CAT_LIST};
use contracts::domain::a010_pricing_policy::aggregate::PricingPolicy;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

impl Searchable for PricingPolicy {
    fn search_haystack(&self) -> String {
        format!("{} {}", self.base.code, self.base.description)
    }
}

/// Выше приоритет - раньше применяется
fn order_by_priority(rows: &mut [PricingPolicy]) {
    rows.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.base.description.cmp(&b.base.description))
    });
}

#[component]
pub fn PricingPolicyList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let state = ListState::<PricingPolicy>::new(PricingPolicy::collection_name()).bind(ctx);

    let visible = Signal::derive(move || {
        let mut rows = filter_list(state.items.get(), &state.filter.get());
        order_by_priority(&mut rows);
        rows
    });
    let visible_ids =
        Signal::derive(move || visible.get().iter().map(|p| p.to_string_id()).collect::<Vec<_>>());

    let open_detail = move |id: Option<String>, name: &str| {
        let title = detail_tab_label(PricingPolicy::element_name(), name);
        ctx.open_tab(&detail_key("a010_pricing_policy", id.as_deref()), &title);
    };

    view! {
        <PageFrame page_id="a010_pricing_policy--list" category=PAGE_CAT_LIST>
            <ListHeader title=PricingPolicy::list_name()>
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
                            <TableHeaderCell>"Adjustment"</TableHeaderCell>
                            <TableHeaderCell>"Priority"</TableHeaderCell>
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
                                            <TableCellLayout>{adjustment_text(p.adjustment.kind, p.adjustment.value)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{p.priority}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{period_text(p.valid_from, p.valid_to)}</TableCellLayout>
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
    use contracts::domain::a010_pricing_policy::aggregate::PricingPolicyDto;

    fn policy(name: &str, priority: i32) -> PricingPolicy {
        PricingPolicy::new_for_insert(&PricingPolicyDto {
            description: name.into(),
            priority,
            ..Default::default()
        })
    }

    #[test]
    fn test_order_by_priority_then_name() {
        let mut rows = vec![policy("Summer", 1), policy("Clearance", 5), policy("Autumn", 1)];
        order_by_priority(&mut rows);
        let names: Vec<_> = rows.iter().map(|p| p.base.description.as_str()).collect();
        assert_eq!(names, vec!["Clearance", "Autumn", "Summer"]);
    }
}
