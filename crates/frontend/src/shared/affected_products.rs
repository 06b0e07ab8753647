//! Таблица товаров, попадающих в область действия политики/промо/правила

use crate::shared::api_utils::get_json;
use crate::shared::form_utils::format_money;
use crate::shared::icons::icon;
use crate::shared::page_frame::ErrorBox;
use contracts::shared::pricing::AffectedProduct;
use leptos::prelude::*;
use thaw::*;

/// Изменение цены относительно базовой, в процентах
pub fn change_text(base_price: f64, price: f64) -> String {
    if base_price <= 0.0 {
        return "-".to_string();
    }
    let pct = (price - base_price) / base_price * 100.0;
    if pct.abs() < 0.005 {
        "0%".to_string()
    } else {
        format!("{:+.1}%", pct)
    }
}

fn matches(row: &AffectedProduct, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    q.is_empty() || row.sku.to_lowercase().contains(&q) || row.name.to_lowercase().contains(&q)
}

/// Загружает строки с `path` (GET) при открытии и по Refresh
///
/// `price_label` - заголовок колонки расчётной цены; без него колонка скрыта.
/// `against_cost` - изменение считать от закупочной цены, а не от прайсовой.
#[component]
pub fn AffectedProducts(
    path: String,
    #[prop(optional)] price_label: Option<&'static str>,
    #[prop(optional)] against_cost: bool,
) -> impl IntoView {
    let rows = RwSignal::new(Vec::<AffectedProduct>::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let query = RwSignal::new(String::new());
    let path = StoredValue::new(path);

    let reload = move || {
        loading.set(true);
        leptos::task::spawn_local(async move {
            match get_json::<Vec<AffectedProduct>>(&path.get_value()).await {
                Ok(list) => {
                    rows.set(list);
                    error.set(None);
                }
                Err(e) => {
                    log::error!("load {} failed: {}", path.get_value(), e);
                    error.set(Some(e));
                }
            }
            loading.set(false);
        });
    };
    reload();

    let visible = Signal::derive(move || {
        let q = query.get();
        rows.with(|list| list.iter().filter(|r| matches(r, &q)).cloned().collect::<Vec<_>>())
    });

    view! {
        <div class="details-section">
            <div class="list-toolbar">
                <Input value=query placeholder="SKU or name..." />
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| reload()
                >
                    {icon("refresh")}
                    " Refresh"
                </Button>
                <span class="list-toolbar__count">
                    {move || {
                        if loading.get() {
                            "Loading...".to_string()
                        } else {
                            format!("{} of {} products", visible.with(|v| v.len()), rows.with(|r| r.len()))
                        }
                    }}
                </span>
            </div>
            <p class="form__hint">"Reflects the saved scope. Save changes before refreshing."</p>

            {move || error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"SKU"</TableHeaderCell>
                            <TableHeaderCell>"Name"</TableHeaderCell>
                            <TableHeaderCell>"Cost"</TableHeaderCell>
                            <TableHeaderCell>"List price"</TableHeaderCell>
                            {price_label.map(|label| view! {
                                <TableHeaderCell>{label}</TableHeaderCell>
                                <TableHeaderCell>"Change"</TableHeaderCell>
                            })}
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || visible.get()
                            key=|r| r.product_id.clone()
                            children=move |r| {
                                let price_cells = price_label.map(|_| {
                                    let base = if against_cost { r.cost_price } else { r.list_price };
                                    let price = r.price.unwrap_or(base);
                                    view! {
                                        <TableCell>
                                            <TableCellLayout>{format_money(price)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{change_text(base, price)}</TableCellLayout>
                                        </TableCell>
                                    }
                                });
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{r.sku.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{r.name.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{format_money(r.cost_price)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{format_money(r.list_price)}</TableCellLayout>
                                        </TableCell>
                                        {price_cells}
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_text() {
        assert_eq!(change_text(100.0, 90.0), "-10.0%");
        assert_eq!(change_text(80.0, 100.0), "+25.0%");
        assert_eq!(change_text(100.0, 100.0), "0%");
        assert_eq!(change_text(0.0, 10.0), "-");
    }

    #[test]
    fn test_matches_sku_or_name() {
        let row = AffectedProduct {
            product_id: "p1".into(),
            sku: "DR-18".into(),
            name: "Cordless drill".into(),
            category_id: None,
            list_price: 100.0,
            cost_price: 60.0,
            price: None,
        };
        assert!(matches(&row, ""));
        assert!(matches(&row, "dr-1"));
        assert!(matches(&row, "DRILL"));
        assert!(!matches(&row, "saw"));
    }
}
