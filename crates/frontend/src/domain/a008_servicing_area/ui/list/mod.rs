use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::components::selection::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{filter_list, SearchInput, Searchable};
use crate::shared::page_frame::{ErrorBox, ListHeader, PageFrame, PAGE_CAT_LIST};
use contracts::domain::a008_servicing_area::aggregate::ServicingArea;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

impl Searchable for ServicingArea {
    fn search_haystack(&self) -> String {
        format!(
            "{} {} {} {}",
            self.base.code,
            self.base.description,
            self.region.as_deref().unwrap_or_default(),
            self.postal_codes.join(" ")
        )
    }
}

/// Индексы в ячейке: первые несколько и счётчик остальных
fn postal_preview(codes: &[String]) -> String {
    const SHOWN: usize = 4;
    if codes.len() <= SHOWN {
        codes.join(", ")
    } else {
        format!("{}, +{}", codes[..SHOWN].join(", "), codes.len() - SHOWN)
    }
}

#[component]
pub fn ServicingAreaList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let state = ListState::<ServicingArea>::new(ServicingArea::collection_name()).bind(ctx);

    let visible = Signal::derive(move || filter_list(state.items.get(), &state.filter.get()));
    let visible_ids =
        Signal::derive(move || visible.get().iter().map(|a| a.to_string_id()).collect::<Vec<_>>());

    let open_detail = move |id: Option<String>, name: &str| {
        let title = detail_tab_label(ServicingArea::element_name(), name);
        ctx.open_tab(&detail_key("a008_servicing_area", id.as_deref()), &title);
    };

    view! {
        <PageFrame page_id="a008_servicing_area--list" category=PAGE_CAT_LIST>
            <ListHeader title=ServicingArea::list_name()>
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
                <SearchInput value=state.filter placeholder="Name, region, postal code..." />
            </div>

            {move || state.error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCheckbox ids=visible_ids selected=state.selected />
                            <TableHeaderCell>"Code"</TableHeaderCell>
                            <TableHeaderCell>"Name"</TableHeaderCell>
                            <TableHeaderCell>"Region"</TableHeaderCell>
                            <TableHeaderCell>"Postal codes"</TableHeaderCell>
                            <TableHeaderCell>"Delivery, days"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || visible.get()
                            key=|a| (a.to_string_id(), a.base.metadata.version)
                            children=move |a| {
                                let id = a.to_string_id();
                                let id_for_link = id.clone();
                                let name = a.base.description.clone();
                                view! {
                                    <TableRow>
                                        <TableCellCheckbox item_id=id selected=state.selected />
                                        <TableCell>
                                            <TableCellLayout truncate=true>{a.base.code.clone()}</TableCellLayout>
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
                                                    {a.base.description.clone()}
                                                </a>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{a.region.clone().unwrap_or_default()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{postal_preview(&a.postal_codes)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{a.delivery_days}</TableCellLayout>
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
    fn test_postal_preview() {
        let codes: Vec<String> = ["101", "102", "103", "104", "105", "106"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(postal_preview(&codes[..2]), "101, 102");
        assert_eq!(postal_preview(&codes), "101, 102, 103, 104, +2");
        assert_eq!(postal_preview(&[]), "");
    }
}
