use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::components::selection::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{filter_list, SearchInput, Searchable};
use crate::shared::page_frame::{ErrorBox, ListHeader, PageFrame, PAGE_CAT_LIST};
use contracts::domain::a004_manufacturer::aggregate::Manufacturer;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

impl Searchable for Manufacturer {
    fn search_haystack(&self) -> String {
        format!(
            "{} {} {}",
            self.base.code,
            self.base.description,
            self.country.as_deref().unwrap_or_default()
        )
    }
}

#[component]
pub fn ManufacturerList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let state = ListState::<Manufacturer>::new(Manufacturer::collection_name()).bind(ctx);

    let visible = Signal::derive(move || filter_list(state.items.get(), &state.filter.get()));
    let visible_ids =
        Signal::derive(move || visible.get().iter().map(|m| m.to_string_id()).collect::<Vec<_>>());

    let open_detail = move |id: Option<String>, name: &str| {
        let title = detail_tab_label(Manufacturer::element_name(), name);
        ctx.open_tab(&detail_key("a004_manufacturer", id.as_deref()), &title);
    };

    view! {
        <PageFrame page_id="a004_manufacturer--list" category=PAGE_CAT_LIST>
            <ListHeader title=Manufacturer::list_name()>
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
                <SearchInput value=state.filter placeholder="Code, name, country..." />
            </div>

            {move || state.error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCheckbox ids=visible_ids selected=state.selected />
                            <TableHeaderCell>"Code"</TableHeaderCell>
                            <TableHeaderCell>"Name"</TableHeaderCell>
                            <TableHeaderCell>"Country"</TableHeaderCell>
                            <TableHeaderCell>"Website"</TableHeaderCell>
                            <TableHeaderCell>"Contact e-mail"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || visible.get()
                            key=|m| (m.to_string_id(), m.base.metadata.version)
                            children=move |m| {
                                let id = m.to_string_id();
                                let id_for_link = id.clone();
                                let name = m.base.description.clone();
                                view! {
                                    <TableRow>
                                        <TableCellCheckbox item_id=id selected=state.selected />
                                        <TableCell>
                                            <TableCellLayout truncate=true>{m.base.code.clone()}</TableCellLayout>
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
                                                    {m.base.description.clone()}
                                                </a>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{m.country.clone().unwrap_or_default()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{m.website.clone().unwrap_or_default()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{m.contact_email.clone().unwrap_or_default()}</TableCellLayout>
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
