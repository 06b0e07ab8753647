use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::components::badge::ActiveBadge;
use crate::shared::components::selection::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::dual_list_selector::model::scope_summary;
use crate::shared::form_utils::format_number;
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{filter_list, SearchInput, Searchable};
use crate::shared::lookup::{label_for, load_into, lookup_items, name_map, LookupSelect};
use crate::shared::page_frame::{ErrorBox, ListHeader, PageFrame, PAGE_CAT_LIST};
use contracts::domain::a005_supplier::aggregate::Supplier;
use contracts::domain::a012_supplier_pricing::aggregate::SupplierPricing;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

impl Searchable for SupplierPricing {
    fn search_haystack(&self) -> String {
        format!("{} {}", self.base.code, self.base.description)
    }
}

#[component]
pub fn SupplierPricingList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let state = ListState::<SupplierPricing>::new(SupplierPricing::collection_name()).bind(ctx);

    let suppliers = RwSignal::new(Vec::<Supplier>::new());
    load_into(Supplier::collection_name(), suppliers);
    let supplier_items = Signal::derive(move || suppliers.with(|s| lookup_items(s, false)));
    let supplier_names = Signal::derive(move || name_map(&supplier_items.get()));
    let supplier_filter = RwSignal::new(String::new());

    let visible = Signal::derive(move || {
        let supplier = supplier_filter.get();
        let mut rows = filter_list(state.items.get(), &state.filter.get());
        if !supplier.is_empty() {
            rows.retain(|sp| sp.supplier_id == supplier);
        }
        rows.sort_by(|a, b| a.base.code.cmp(&b.base.code));
        rows
    });
    let visible_ids =
        Signal::derive(move || visible.get().iter().map(|sp| sp.to_string_id()).collect::<Vec<_>>());

    let open_detail = move |id: Option<String>, name: &str| {
        let title = detail_tab_label(SupplierPricing::element_name(), name);
        ctx.open_tab(&detail_key("a012_supplier_pricing", id.as_deref()), &title);
    };

    view! {
        <PageFrame page_id="a012_supplier_pricing--list" category=PAGE_CAT_LIST>
            <ListHeader title=SupplierPricing::list_name()>
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
                <LookupSelect value=supplier_filter options=supplier_items empty_label="All suppliers" />
            </div>

            {move || state.error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCheckbox ids=visible_ids selected=state.selected />
                            <TableHeaderCell>"Code"</TableHeaderCell>
                            <TableHeaderCell>"Supplier"</TableHeaderCell>
                            <TableHeaderCell>"Name"</TableHeaderCell>
                            <TableHeaderCell>"Discount"</TableHeaderCell>
                            <TableHeaderCell>"Min. order"</TableHeaderCell>
                            <TableHeaderCell>"Lead time"</TableHeaderCell>
                            <TableHeaderCell>"Scope"</TableHeaderCell>
                            <TableHeaderCell>"Status"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || visible.get()
                            key=|sp| (sp.to_string_id(), sp.base.metadata.version)
                            children=move |sp| {
                                let id = sp.to_string_id();
                                let id_for_link = id.clone();
                                let supplier_id = sp.supplier_id.clone();
                                let supplier_label = Signal::derive(move || {
                                    supplier_names.with(|n| label_for(n, Some(&supplier_id)))
                                });
                                view! {
                                    <TableRow>
                                        <TableCellCheckbox item_id=id selected=state.selected />
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                <a
                                                    href="#"
                                                    class="table__link"
                                                    on:click=move |e| {
                                                        e.prevent_default();
                                                        open_detail(Some(id_for_link.clone()), &supplier_label.get_untracked());
                                                    }
                                                >
                                                    {sp.base.code.clone()}
                                                </a>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{move || supplier_label.get()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{sp.base.description.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{format!("{}%", format_number(sp.discount_percent))}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{sp.min_order_qty}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{format!("{} d", sp.lead_time_days)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{scope_summary(&sp.scope)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <ActiveBadge is_active=sp.is_active />
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
