use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::components::selection::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{filter_list, SearchInput, Searchable};
use crate::shared::lookup::{category_options, label_for, load_into, name_map, LookupSelect};
use crate::shared::page_frame::{ErrorBox, ListHeader, PageFrame, PAGE_CAT_LIST};
use contracts::domain::a001_category::aggregate::Category;
use contracts::domain::a003_specification::aggregate::Specification;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

impl Searchable for Specification {
    fn search_haystack(&self) -> String {
        format!("{} {}", self.base.code, self.label())
    }
}

/// Список спецификаций с отбором по категории
#[component]
pub fn SpecificationList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let state = ListState::<Specification>::new(Specification::collection_name()).bind(ctx);

    let categories = RwSignal::new(Vec::<Category>::new());
    load_into(Category::collection_name(), categories);
    let category_items = Signal::derive(move || categories.with(|c| category_options(c, None)));
    let category_names = Signal::derive(move || name_map(&category_items.get()));
    let category_filter = RwSignal::new(String::new());

    let visible = Signal::derive(move || {
        let mut rows = filter_list(state.items.get(), &state.filter.get());
        let cat = category_filter.get();
        if !cat.is_empty() {
            rows.retain(|s| s.category_id.as_deref() == Some(cat.as_str()));
        }
        rows.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.base.description.to_lowercase().cmp(&b.base.description.to_lowercase()))
        });
        rows
    });
    let visible_ids =
        Signal::derive(move || visible.get().iter().map(|s| s.to_string_id()).collect::<Vec<_>>());

    let open_detail = move |id: Option<String>, name: &str| {
        let title = detail_tab_label(Specification::element_name(), name);
        ctx.open_tab(&detail_key("a003_specification", id.as_deref()), &title);
    };

    view! {
        <PageFrame page_id="a003_specification--list" category=PAGE_CAT_LIST>
            <ListHeader title=Specification::list_name()>
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
                <SearchInput value=state.filter placeholder="Code, name, unit..." />
                <LookupSelect value=category_filter options=category_items empty_label="All categories" />
            </div>

            {move || state.error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCheckbox ids=visible_ids selected=state.selected />
                            <TableHeaderCell>"Code"</TableHeaderCell>
                            <TableHeaderCell>"Name"</TableHeaderCell>
                            <TableHeaderCell>"Category"</TableHeaderCell>
                            <TableHeaderCell>"Unit"</TableHeaderCell>
                            <TableHeaderCell>"Order"</TableHeaderCell>
                            <TableHeaderCell>"Required"</TableHeaderCell>
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
                                let category_id = s.category_id.clone();
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
                                            <TableCellLayout truncate=true>
                                                {move || category_names.with(|names| label_for(names, category_id.as_deref()))}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{s.unit.clone().unwrap_or_default()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{s.sort_order}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{if s.is_required { "Yes" } else { "" }}</TableCellLayout>
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
