use super::model::{all_parent_ids, tree_rows, TreeRow};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::api_utils::upsert;
use crate::shared::components::badge::ActiveBadge;
use crate::shared::components::selection::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::SearchInput;
use crate::shared::modal_frame::DialogLayout;
use crate::shared::modal_stack::{ModalHandle, ModalStackService};
use crate::shared::page_frame::{ErrorBox, ListHeader, PageFrame, PAGE_CAT_LIST};
use contracts::domain::a001_category::aggregate::{Category, CategoryDto};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;

/// Окно «новая подкатегория»: только имя, остальное - в карточке
#[component]
fn AddChildDialog(parent_id: String, parent_name: String, handle: ModalHandle) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let name = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let close = handle.clone();
    let on_cancel = Callback::new(move |_| close.close());
    let on_save = Callback::new(move |_| {
        let description = name.get_untracked().trim().to_string();
        if description.is_empty() {
            error.set(Some("Category name is required".into()));
            return;
        }
        let dto = CategoryDto {
            description,
            parent_id: Some(parent_id.clone()),
            ..Default::default()
        };
        let handle = handle.clone();
        saving.set(true);
        leptos::task::spawn_local(async move {
            match upsert(Category::collection_name(), &dto).await {
                Ok(_) => {
                    ctx.notify_saved();
                    handle.close();
                }
                Err(e) => error.set(Some(e)),
            }
            saving.set(false);
        });
    });

    view! {
        <DialogLayout
            title=format!("New subcategory of {}", parent_name)
            error=error
            saving=saving
            on_save=on_save
            on_cancel=on_cancel
        >
            <div class="form__group">
                <label class="form__label">"Name *"</label>
                <Input value=name />
            </div>
        </DialogLayout>
    }
}

/// Дерево категорий: раскрытие, фильтр, подкатегории, удаление
#[component]
pub fn CategoryTree() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let modals = use_context::<ModalStackService>().expect("ModalStackService not found");
    let state = ListState::<Category>::new(Category::collection_name()).bind(ctx);
    let expanded = RwSignal::new(HashSet::<String>::new());

    let rows = Memo::new(move |_| {
        state
            .items
            .with(|cats| expanded.with(|open| tree_rows(cats, open, &state.filter.get())))
    });
    let visible_ids =
        Signal::derive(move || rows.with(|r| r.iter().map(|row| row.id.clone()).collect::<Vec<_>>()));

    let open_detail = move |id: Option<String>, name: &str| {
        let title = detail_tab_label(Category::element_name(), name);
        ctx.open_tab(&detail_key("a001_category", id.as_deref()), &title);
    };

    let add_child = move |parent_id: String, parent_name: String| {
        modals.push(move |handle| {
            view! {
                <AddChildDialog
                    parent_id=parent_id.clone()
                    parent_name=parent_name.clone()
                    handle=handle
                />
            }
            .into_any()
        });
    };

    let render_row = move |row: TreeRow| {
        let indent = format!("padding-left: {}px;", row.depth * 20);
        let toggle_id = row.id.clone();
        let link_id = row.id.clone();
        let link_name = row.name.clone();
        let child_id = row.id.clone();
        let child_name = row.name.clone();
        let toggle = if row.has_children {
            let name = if row.expanded { "chevron-down" } else { "chevron-right" };
            view! {
                <span
                    class="tree__toggle"
                    on:click=move |_| {
                        expanded.update(|set| {
                            if !set.remove(&toggle_id) {
                                set.insert(toggle_id.clone());
                            }
                        })
                    }
                >
                    {icon(name)}
                </span>
            }
            .into_any()
        } else {
            view! { <span class="tree__toggle tree__toggle--empty"></span> }.into_any()
        };
        let folder = if row.expanded { icon("folder-open") } else { icon("folder-closed") };

        view! {
            <TableRow>
                <TableCellCheckbox item_id=row.id.clone() selected=state.selected />
                <TableCell>
                    <div class="tree__cell" style=indent>
                        {toggle}
                        {folder}
                        <a
                            href="#"
                            class="table__link"
                            on:click=move |e| {
                                e.prevent_default();
                                open_detail(Some(link_id.clone()), &link_name);
                            }
                        >
                            {row.name.clone()}
                        </a>
                    </div>
                </TableCell>
                <TableCell>
                    <TableCellLayout truncate=true>{row.code.clone()}</TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout>{row.sort_order}</TableCellLayout>
                </TableCell>
                <TableCell>
                    <TableCellLayout>
                        <ActiveBadge is_active=row.is_active />
                    </TableCellLayout>
                </TableCell>
                <TableCell>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| add_child(child_id.clone(), child_name.clone())
                    >
                        {icon("plus")}
                        " Subcategory"
                    </Button>
                </TableCell>
            </TableRow>
        }
    };

    view! {
        <PageFrame page_id="a001_category--list" category=PAGE_CAT_LIST>
            <ListHeader title=Category::list_name()>
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
                <SearchInput value=state.filter placeholder="Filter by name or code..." />
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| expanded.set(state.items.with_untracked(|c| all_parent_ids(c)))
                >
                    {icon("chevron-down")}
                    " Expand all"
                </Button>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| expanded.set(HashSet::new())
                >
                    {icon("chevron-right")}
                    " Collapse all"
                </Button>
            </div>

            {move || state.error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCheckbox ids=visible_ids selected=state.selected />
                            <TableHeaderCell>"Name"</TableHeaderCell>
                            <TableHeaderCell>"Code"</TableHeaderCell>
                            <TableHeaderCell>"Order"</TableHeaderCell>
                            <TableHeaderCell>"Status"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || rows.get()
                            key=|row| (row.id.clone(), row.version, row.expanded, row.depth)
                            children=render_row
                        />
                    </TableBody>
                </Table>
            </div>
        </PageFrame>
    }
}
