//! Список товаров
//!
//! Строка поиска уходит на сервер (`/api/product/search`) с задержкой,
//! отбор по категории включает подкатегории.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::api_utils::{api_url, get_json};
use crate::shared::components::badge::{Badge, BadgeVariant};
use crate::shared::components::selection::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::form_utils::format_money;
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{
    cmp_f64, cmp_text, get_sort_indicator, sort_list, toggle_sort, SearchInput, Sortable,
};
use crate::shared::lookup::{category_options, label_for, load_into, name_map, LookupSelect};
use crate::shared::page_frame::{ErrorBox, ListHeader, PageFrame, PAGE_CAT_LIST};
use contracts::domain::a001_category::aggregate::Category;
use contracts::domain::a006_product::aggregate::{Product, ProductStatus};
use contracts::domain::common::AggregateRoot;
use contracts::shared::hierarchy::descendants_of;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::cmp::Ordering;
use thaw::*;

const SEARCH_DELAY_MS: u32 = 300;

impl Sortable for Product {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "sku" => cmp_text(self.sku(), other.sku()),
            "list_price" => cmp_f64(self.list_price, other.list_price),
            "status" => self.status.as_str().cmp(other.status.as_str()),
            _ => cmp_text(&self.base.description, &other.base.description),
        }
    }
}

pub fn status_variant(status: ProductStatus) -> BadgeVariant {
    match status {
        ProductStatus::Draft => BadgeVariant::Neutral,
        ProductStatus::Active => BadgeVariant::Success,
        ProductStatus::Discontinued => BadgeVariant::Warning,
    }
}

/// Отбор по категории (с подкатегориями) и статусу
fn filter_products(
    products: Vec<Product>,
    categories: &[Category],
    category_id: &str,
    status: &str,
) -> Vec<Product> {
    let allowed: Option<Vec<String>> = (!category_id.is_empty()).then(|| {
        let mut ids = descendants_of(categories, category_id);
        ids.push(category_id.to_string());
        ids
    });
    products
        .into_iter()
        .filter(|p| match &allowed {
            None => true,
            Some(ids) => p.category_id.as_ref().is_some_and(|c| ids.contains(c)),
        })
        .filter(|p| status.is_empty() || p.status.as_str() == status)
        .collect()
}

#[component]
pub fn ProductList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let state = ListState::<Product>::new(Product::collection_name()).bind(ctx);

    let categories = RwSignal::new(Vec::<Category>::new());
    load_into(Category::collection_name(), categories);
    let category_items = Signal::derive(move || categories.with(|c| category_options(c, None)));
    let category_names = Signal::derive(move || name_map(&category_items.get()));

    let category_filter = RwSignal::new(String::new());
    let status_filter = RwSignal::new(String::new());
    let sort_field = RwSignal::new("description".to_string());
    let sort_ascending = RwSignal::new(true);

    // None - поиск не активен, показываем весь список
    let search_results = RwSignal::new(None::<Vec<Product>>);
    Effect::new(move |_| {
        let query = state.filter.get();
        ctx.data_version.track();
        if query.trim().is_empty() {
            search_results.set(None);
            return;
        }
        leptos::task::spawn_local(async move {
            TimeoutFuture::new(SEARCH_DELAY_MS).await;
            if state.filter.get_untracked() != query {
                return;
            }
            let path = format!("/api/product/search?q={}", urlencoding::encode(query.trim()));
            match get_json::<Vec<Product>>(&path).await {
                Ok(found) => search_results.set(Some(found)),
                Err(e) => state.error.set(Some(e)),
            }
        });
    });

    let visible = Signal::derive(move || {
        let source = search_results.get().unwrap_or_else(|| state.items.get());
        let mut rows = categories.with(|cats| {
            filter_products(source, cats, &category_filter.get(), &status_filter.get())
        });
        sort_list(&mut rows, &sort_field.get(), sort_ascending.get());
        rows
    });
    let visible_ids =
        Signal::derive(move || visible.get().iter().map(|p| p.to_string_id()).collect::<Vec<_>>());

    let open_detail = move |id: Option<String>, name: &str| {
        let title = detail_tab_label(Product::element_name(), name);
        ctx.open_tab(&detail_key("a006_product", id.as_deref()), &title);
    };

    let sort_header = move |field: &'static str, label: &'static str| {
        view! {
            <div class="table__sortable-header" style="cursor: pointer;" on:click=move |_| toggle_sort(sort_field, sort_ascending, field)>
                {label}
                <span>{move || get_sort_indicator(&sort_field.get(), field, sort_ascending.get())}</span>
            </div>
        }
    };

    view! {
        <PageFrame page_id="a006_product--list" category=PAGE_CAT_LIST>
            <ListHeader title=Product::list_name()>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| open_detail(None, "new")>
                    {icon("plus")}
                    " New"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| state.reload()>
                    {icon("refresh")}
                    " Refresh"
                </Button>
                <a class="button button--secondary" href=api_url("/api/product/export") download="products.csv">
                    {icon("download")}
                    " Export CSV"
                </a>
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
                <SearchInput value=state.filter placeholder="SKU, name, barcode..." />
                <LookupSelect value=category_filter options=category_items empty_label="All categories" />
                <select
                    class="form__input form__select"
                    prop:value=move || status_filter.get()
                    on:change=move |ev| status_filter.set(event_target_value(&ev))
                >
                    <option value="">"All statuses"</option>
                    {ProductStatus::all()
                        .into_iter()
                        .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                        .collect_view()}
                </select>
                <span class="list-toolbar__count">{move || format!("{} items", visible.with(|v| v.len()))}</span>
            </div>

            {move || state.error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCheckbox ids=visible_ids selected=state.selected />
                            <TableHeaderCell>{sort_header("sku", "SKU")}</TableHeaderCell>
                            <TableHeaderCell>{sort_header("description", "Name")}</TableHeaderCell>
                            <TableHeaderCell>"Category"</TableHeaderCell>
                            <TableHeaderCell>{sort_header("list_price", "List price")}</TableHeaderCell>
                            <TableHeaderCell>"Cost"</TableHeaderCell>
                            <TableHeaderCell>{sort_header("status", "Status")}</TableHeaderCell>
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
                                let category_id = p.category_id.clone();
                                let sku = p.sku().to_string();
                                view! {
                                    <TableRow>
                                        <TableCellCheckbox item_id=id selected=state.selected />
                                        <TableCell>
                                            <TableCellLayout truncate=true>{sku}</TableCellLayout>
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
                                            <TableCellLayout truncate=true>
                                                {move || category_names.with(|n| label_for(n, category_id.as_deref()))}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{format_money(p.list_price)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{format_money(p.cost_price)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <Badge variant=status_variant(p.status)>{p.status.label()}</Badge>
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
    use contracts::domain::a001_category::aggregate::CategoryDto;
    use contracts::domain::a006_product::aggregate::ProductDto;

    fn category(name: &str, parent: Option<&Category>) -> Category {
        Category::new_for_insert(&CategoryDto {
            description: name.into(),
            parent_id: parent.map(|p| p.to_string_id()),
            ..Default::default()
        })
    }

    fn product(sku: &str, category: Option<&Category>, status: ProductStatus) -> Product {
        Product::new_for_insert(&ProductDto {
            code: sku.into(),
            description: format!("Product {}", sku),
            category_id: category.map(|c| c.to_string_id()),
            status,
            ..Default::default()
        })
    }

    #[test]
    fn test_filter_products_includes_subcategories() {
        let tools = category("Tools", None);
        let drills = category("Drills", Some(&tools));
        let garden = category("Garden", None);
        let cats = vec![tools.clone(), drills.clone(), garden.clone()];
        let products = vec![
            product("A", Some(&tools), ProductStatus::Active),
            product("B", Some(&drills), ProductStatus::Draft),
            product("C", Some(&garden), ProductStatus::Active),
            product("D", None, ProductStatus::Draft),
        ];

        let skus = |list: Vec<Product>| list.iter().map(|p| p.sku().to_string()).collect::<Vec<_>>();
        assert_eq!(skus(filter_products(products.clone(), &cats, "", "")).len(), 4);
        assert_eq!(
            skus(filter_products(products.clone(), &cats, &tools.to_string_id(), "")),
            vec!["A", "B"]
        );
        assert_eq!(
            skus(filter_products(products.clone(), &cats, &tools.to_string_id(), "active")),
            vec!["A"]
        );
        assert_eq!(skus(filter_products(products, &cats, "", "draft")), vec!["B", "D"]);
    }
}
