use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::components::badge::ActiveBadge;
use crate::shared::components::selection::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{filter_list, SearchInput, Searchable};
use crate::shared::lookup::{load_into, lookup_items, name_map};
use crate::shared::page_frame::{ErrorBox, ListHeader, PageFrame, PAGE_CAT_LIST};
use contracts::domain::a007_warehouse::aggregate::Warehouse;
use contracts::domain::a008_servicing_area::aggregate::ServicingArea;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use std::collections::HashMap;
use thaw::*;

impl Searchable for Warehouse {
    fn search_haystack(&self) -> String {
        format!(
            "{} {} {}",
            self.base.code,
            self.base.description,
            self.address.as_deref().unwrap_or_default()
        )
    }
}

fn area_names(ids: &[String], names: &HashMap<String, String>) -> String {
    ids.iter()
        .filter_map(|id| names.get(id).cloned())
        .collect::<Vec<_>>()
        .join(", ")
}

#[component]
pub fn WarehouseList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let state = ListState::<Warehouse>::new(Warehouse::collection_name()).bind(ctx);
    let active_only = RwSignal::new(false);

    let areas = RwSignal::new(Vec::<ServicingArea>::new());
    load_into(ServicingArea::collection_name(), areas);
    let area_map = Signal::derive(move || areas.with(|a| name_map(&lookup_items(a, false))));

    let visible = Signal::derive(move || {
        let mut rows = filter_list(state.items.get(), &state.filter.get());
        if active_only.get() {
            rows.retain(|w| w.is_active);
        }
        rows
    });
    let visible_ids =
        Signal::derive(move || visible.get().iter().map(|w| w.to_string_id()).collect::<Vec<_>>());

    let open_detail = move |id: Option<String>, name: &str| {
        let title = detail_tab_label(Warehouse::element_name(), name);
        ctx.open_tab(&detail_key("a007_warehouse", id.as_deref()), &title);
    };

    view! {
        <PageFrame page_id="a007_warehouse--list" category=PAGE_CAT_LIST>
            <ListHeader title=Warehouse::list_name()>
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
                <SearchInput value=state.filter placeholder="Code, name, address..." />
                <Checkbox checked=active_only label="Active only" />
            </div>

            {move || state.error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCheckbox ids=visible_ids selected=state.selected />
                            <TableHeaderCell>"Code"</TableHeaderCell>
                            <TableHeaderCell>"Name"</TableHeaderCell>
                            <TableHeaderCell>"Address"</TableHeaderCell>
                            <TableHeaderCell>"Servicing areas"</TableHeaderCell>
                            <TableHeaderCell>"Status"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || visible.get()
                            key=|w| (w.to_string_id(), w.base.metadata.version)
                            children=move |w| {
                                let id = w.to_string_id();
                                let id_for_link = id.clone();
                                let name = w.base.description.clone();
                                let area_ids = w.servicing_area_ids.clone();
                                view! {
                                    <TableRow>
                                        <TableCellCheckbox item_id=id selected=state.selected />
                                        <TableCell>
                                            <TableCellLayout truncate=true>{w.base.code.clone()}</TableCellLayout>
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
                                                    {w.base.description.clone()}
                                                </a>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{w.address.clone().unwrap_or_default()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {move || area_map.with(|names| area_names(&area_ids, names))}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <ActiveBadge is_active=w.is_active />
                                            </TableCellLayout>
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

    #[test]
    fn test_area_names_skips_unknown_ids() {
        let names: HashMap<String, String> =
            [("a".to_string(), "North".to_string()), ("b".to_string(), "South".to_string())]
                .into_iter()
                .collect();
        let ids = vec!["b".to_string(), "zzz".to_string(), "a".to_string()];
        assert_eq!(area_names(&ids, &names), "South, North");
    }
}
