//! Остатки: одна строка на пару товар/склад

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::components::badge::{Badge, BadgeVariant};
use crate::shared::components::selection::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::lookup::{label_for, load_into, lookup_items, name_map, LookupSelect};
use crate::shared::page_frame::{ErrorBox, ListHeader, PageFrame, PAGE_CAT_LIST};
use contracts::domain::a006_product::aggregate::Product;
use contracts::domain::a007_warehouse::aggregate::Warehouse;
use contracts::domain::a009_inventory::aggregate::InventoryRecord;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

const COLLECTION: &str = "inventory";

/// Отбор по товару, складу и «только к дозаказу»
fn filter_records(
    records: Vec<InventoryRecord>,
    product_id: &str,
    warehouse_id: &str,
    reorder_only: bool,
) -> Vec<InventoryRecord> {
    records
        .into_iter()
        .filter(|r| product_id.is_empty() || r.product_id == product_id)
        .filter(|r| warehouse_id.is_empty() || r.warehouse_id == warehouse_id)
        .filter(|r| !reorder_only || r.needs_reorder())
        .collect()
}

#[component]
pub fn InventoryList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let state = ListState::<InventoryRecord>::new(COLLECTION).bind(ctx);

    let products = RwSignal::new(Vec::<Product>::new());
    let warehouses = RwSignal::new(Vec::<Warehouse>::new());
    load_into(Product::collection_name(), products);
    load_into(Warehouse::collection_name(), warehouses);
    let product_items = Signal::derive(move || products.with(|p| lookup_items(p, true)));
    let warehouse_items = Signal::derive(move || warehouses.with(|w| lookup_items(w, false)));
    let product_names = Signal::derive(move || name_map(&product_items.get()));
    let warehouse_names = Signal::derive(move || name_map(&warehouse_items.get()));

    let product_filter = RwSignal::new(String::new());
    let warehouse_filter = RwSignal::new(String::new());
    let reorder_only = RwSignal::new(false);

    let visible = Signal::derive(move || {
        filter_records(
            state.items.get(),
            &product_filter.get(),
            &warehouse_filter.get(),
            reorder_only.get(),
        )
    });
    let visible_ids =
        Signal::derive(move || visible.get().iter().map(|r| r.id.clone()).collect::<Vec<_>>());

    let open_detail = move |id: Option<String>, name: &str| {
        let title = detail_tab_label("Stock record", name);
        ctx.open_tab(&detail_key("a009_inventory", id.as_deref()), &title);
    };

    view! {
        <PageFrame page_id="a009_inventory--list" category=PAGE_CAT_LIST>
            <ListHeader title="Inventory">
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
                <LookupSelect value=product_filter options=product_items empty_label="All products" />
                <LookupSelect value=warehouse_filter options=warehouse_items empty_label="All warehouses" />
                <Checkbox checked=reorder_only label="Needs reorder" />
            </div>

            {move || state.error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCheckbox ids=visible_ids selected=state.selected />
                            <TableHeaderCell>"Product"</TableHeaderCell>
                            <TableHeaderCell>"Warehouse"</TableHeaderCell>
                            <TableHeaderCell>"On hand"</TableHeaderCell>
                            <TableHeaderCell>"Reserved"</TableHeaderCell>
                            <TableHeaderCell>"Available"</TableHeaderCell>
                            <TableHeaderCell>"Reorder point"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || visible.get()
                            key=|r| (r.id.clone(), r.updated_at)
                            children=move |r| {
                                let id = r.id.clone();
                                let id_for_link = id.clone();
                                let product_id = r.product_id.clone();
                                let product_for_link = r.product_id.clone();
                                let warehouse_id = r.warehouse_id.clone();
                                let reorder = r.needs_reorder();
                                let available = r.available();
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
                                                        let name = product_names
                                                            .with_untracked(|n| label_for(n, Some(&product_for_link)));
                                                        open_detail(Some(id_for_link.clone()), &name);
                                                    }
                                                >
                                                    {move || product_names.with(|n| label_for(n, Some(&product_id)))}
                                                </a>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {move || warehouse_names.with(|n| label_for(n, Some(&warehouse_id)))}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{r.quantity_on_hand}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{r.quantity_reserved}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {if reorder {
                                                    view! {
                                                        <Badge variant=BadgeVariant::Warning>{available}</Badge>
                                                    }
                                                        .into_any()
                                                } else {
                                                    view! { <span>{available}</span> }.into_any()
                                                }}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{r.reorder_point}</TableCellLayout>
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
    use chrono::Utc;

    fn record(product: &str, warehouse: &str, on_hand: i64, reorder_point: i64) -> InventoryRecord {
        InventoryRecord {
            id: format!("{}-{}", product, warehouse),
            product_id: product.into(),
            warehouse_id: warehouse.into(),
            quantity_on_hand: on_hand,
            quantity_reserved: 0,
            reorder_point,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_filter_records() {
        let all = vec![
            record("p1", "w1", 10, 5),
            record("p1", "w2", 2, 5),
            record("p2", "w1", 3, 0),
        ];
        assert_eq!(filter_records(all.clone(), "", "", false).len(), 3);
        assert_eq!(filter_records(all.clone(), "p1", "", false).len(), 2);
        assert_eq!(filter_records(all.clone(), "p1", "w2", false).len(), 1);

        let reorder = filter_records(all, "", "", true);
        assert_eq!(reorder.len(), 1);
        assert_eq!(reorder[0].warehouse_id, "w2");
    }
}
