use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::components::badge::ActiveBadge;
use crate::shared::components::selection::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{filter_list, SearchInput, Searchable};
use crate::shared::page_frame::{ErrorBox, ListHeader, PageFrame, PAGE_CAT_LIST};
use contracts::domain::a005_supplier::aggregate::Supplier;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

impl Searchable for Supplier {
    fn search_haystack(&self) -> String {
        format!(
            "{} {} {} {}",
            self.base.code,
            self.base.description,
            self.contact_name.as_deref().unwrap_or_default(),
            self.email.as_deref().unwrap_or_default()
        )
    }
}

#[component]
pub fn SupplierList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let state = ListState::<Supplier>::new(Supplier::collection_name()).bind(ctx);
    let active_only = RwSignal::new(false);

    let visible = Signal::derive(move || {
        let mut rows = filter_list(state.items.get(), &state.filter.get());
        if active_only.get() {
            rows.retain(|s| s.is_active);
        }
        rows
    });
    let visible_ids =
        Signal::derive(move || visible.get().iter().map(|s| s.to_string_id()).collect::<Vec<_>>());

    let open_detail = move |id: Option<String>, name: &str| {
        let title = detail_tab_label(Supplier::element_name(), name);
        ctx.open_tab(&detail_key("a005_supplier", id.as_deref()), &title);
    };

    view! {
        <PageFrame page_id="a005_supplier--list" category=PAGE_CAT_LIST>
            <ListHeader title=Supplier::list_name()>
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
                <SearchInput value=state.filter placeholder="Code, name, contact..." />
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
                            <TableHeaderCell>"Contact"</TableHeaderCell>
                            <TableHeaderCell>"E-mail"</TableHeaderCell>
                            <TableHeaderCell>"Phone"</TableHeaderCell>
                            <TableHeaderCell>"Status"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || visible.get()
                            key=|s| (s.to_string_id(), s.base.metadata.version)
                            children=move |s| {
                                let id = s.to_string_id();
                                let id_for_link = id.clone();
                                let name = s.base.description.clone();
                                view! {
                                    <TableRow>
                                        <TableCellCheckbox item_id=id selected=state.selected />
                                        <TableCell>
                                            <TableCellLayout truncate=true>{s.base.code.clone()}</TableCellLayout>
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
                                                    {s.base.description.clone()}
                                                </a>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{s.contact_name.clone().unwrap_or_default()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{s.email.clone().unwrap_or_default()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{s.phone.clone().unwrap_or_default()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <ActiveBadge is_active=s.is_active />
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
