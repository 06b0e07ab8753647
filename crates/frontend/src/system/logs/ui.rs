//! Журнал системы: события сервера и клиента

use super::api::{clear_logs, fetch_logs};
use crate::shared::components::badge::{Badge, BadgeVariant};
use crate::shared::icons::icon;
use crate::shared::list_state::confirm;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::{ErrorBox, ListHeader, PageFrame, PAGE_CAT_SYSTEM};
use contracts::shared::logger::LogEntry;
use leptos::prelude::*;
use thaw::*;

fn source_variant(source: &str) -> BadgeVariant {
    match source {
        "server" => BadgeVariant::Primary,
        "client" => BadgeVariant::Neutral,
        _ => BadgeVariant::Warning,
    }
}

/// Новые сверху; отбор по категории и тексту
fn filter_entries(mut entries: Vec<LogEntry>, category: &str, query: &str) -> Vec<LogEntry> {
    let q = query.trim().to_lowercase();
    entries.retain(|e| {
        (category.is_empty() || e.category == category)
            && (q.is_empty()
                || e.message.to_lowercase().contains(&q)
                || e.category.to_lowercase().contains(&q))
    });
    entries.sort_by(|a, b| b.id.cmp(&a.id));
    entries
}

fn categories_of(entries: &[LogEntry]) -> Vec<String> {
    let mut out: Vec<String> = entries.iter().map(|e| e.category.clone()).collect();
    out.sort();
    out.dedup();
    out
}

#[component]
pub fn LogList() -> impl IntoView {
    let entries = RwSignal::new(Vec::<LogEntry>::new());
    let error = RwSignal::new(None::<String>);
    let query = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());

    let reload = move || {
        leptos::task::spawn_local(async move {
            match fetch_logs().await {
                Ok(list) => {
                    entries.set(list);
                    error.set(None);
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };
    reload();

    let clear = move || {
        if !confirm("Clear the whole system log?") {
            return;
        }
        leptos::task::spawn_local(async move {
            match clear_logs().await {
                Ok(removed) => {
                    log::info!("system log cleared: {} entries", removed);
                    entries.set(Vec::new());
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let visible = Signal::derive(move || filter_entries(entries.get(), &category.get(), &query.get()));
    let category_list = Signal::derive(move || entries.with(|e| categories_of(e)));

    view! {
        <PageFrame page_id="sys_logs--system" category=PAGE_CAT_SYSTEM>
            <ListHeader title="System log">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| reload()>
                    {icon("refresh")}
                    " Refresh"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || entries.with(|e| e.is_empty()))
                    on_click=move |_| clear()
                >
                    {icon("delete")}
                    " Clear"
                </Button>
            </ListHeader>

            <div class="list-toolbar">
                <SearchInput value=query placeholder="Message..." />
                <select
                    class="form__input form__select"
                    prop:value=move || category.get()
                    on:change=move |ev| category.set(event_target_value(&ev))
                >
                    <option value="">"All categories"</option>
                    {move || {
                        category_list
                            .get()
                            .into_iter()
                            .map(|c| view! { <option value=c.clone()>{c.clone()}</option> })
                            .collect_view()
                    }}
                </select>
                <span class="list-toolbar__count">{move || format!("{} entries", visible.with(|v| v.len()))}</span>
            </div>

            {move || error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell attr:style="width: 180px;">"Time"</TableHeaderCell>
                            <TableHeaderCell attr:style="width: 90px;">"Source"</TableHeaderCell>
                            <TableHeaderCell attr:style="width: 160px;">"Category"</TableHeaderCell>
                            <TableHeaderCell>"Message"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || visible.get()
                            key=|e| e.id
                            children=move |e| {
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout>{e.timestamp.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <Badge variant=source_variant(&e.source)>{e.source.clone()}</Badge>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{e.category.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{e.message.clone()}</TableCellLayout>
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

    fn entry(id: i64, category: &str, message: &str) -> LogEntry {
        LogEntry {
            id,
            timestamp: "2024-05-01 10:00:00".into(),
            source: "server".into(),
            category: category.into(),
            message: message.into(),
        }
    }

    #[test]
    fn test_filter_entries_newest_first() {
        let entries = vec![
            entry(1, "product", "Product DR-18 saved"),
            entry(2, "category", "Category Tools deleted"),
            entry(3, "product", "Product SAW-1 deleted"),
        ];
        let ids = |list: Vec<LogEntry>| list.iter().map(|e| e.id).collect::<Vec<_>>();
        assert_eq!(ids(filter_entries(entries.clone(), "", "")), vec![3, 2, 1]);
        assert_eq!(ids(filter_entries(entries.clone(), "product", "")), vec![3, 1]);
        assert_eq!(ids(filter_entries(entries.clone(), "", "deleted")), vec![3, 2]);
        assert_eq!(categories_of(&entries), vec!["category", "product"]);
    }
}
