use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::components::badge::{Badge, BadgeVariant};
use crate::shared::components::selection::{TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{
    cmp_text, filter_list, get_sort_indicator, sort_list, toggle_sort, SearchInput, Searchable,
    Sortable,
};
use crate::shared::page_frame::{ErrorBox, ListHeader, PageFrame, PAGE_CAT_LIST};
use contracts::domain::a002_attribute::aggregate::{Attribute, AttributeDataType};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use std::cmp::Ordering;
use thaw::*;

pub fn data_type_label(t: AttributeDataType) -> &'static str {
    match t {
        AttributeDataType::Text => "Text",
        AttributeDataType::Number => "Number",
        AttributeDataType::Boolean => "Yes / No",
        AttributeDataType::Choice => "Choice",
    }
}

impl Searchable for Attribute {
    fn search_haystack(&self) -> String {
        format!("{} {} {}", self.base.code, self.base.description, self.options.join(" "))
    }
}

impl Sortable for Attribute {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "code" => cmp_text(&self.base.code, &other.base.code),
            "data_type" => self.data_type.as_str().cmp(other.data_type.as_str()),
            _ => cmp_text(&self.base.description, &other.base.description),
        }
    }
}

#[component]
pub fn AttributeList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let state = ListState::<Attribute>::new(Attribute::collection_name()).bind(ctx);
    let sort_field = RwSignal::new("description".to_string());
    let sort_ascending = RwSignal::new(true);

    let visible = Signal::derive(move || {
        let mut rows = filter_list(state.items.get(), &state.filter.get());
        sort_list(&mut rows, &sort_field.get(), sort_ascending.get());
        rows
    });
    let visible_ids =
        Signal::derive(move || visible.get().iter().map(|a| a.to_string_id()).collect::<Vec<_>>());

    let open_detail = move |id: Option<String>, name: &str| {
        let title = detail_tab_label(Attribute::element_name(), name);
        ctx.open_tab(&detail_key("a002_attribute", id.as_deref()), &title);
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
        <PageFrame page_id="a002_attribute--list" category=PAGE_CAT_LIST>
            <ListHeader title=Attribute::list_name()>
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
                <SearchInput value=state.filter placeholder="Code, name, option..." />
            </div>

            {move || state.error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCheckbox ids=visible_ids selected=state.selected />
                            <TableHeaderCell>{sort_header("code", "Code")}</TableHeaderCell>
                            <TableHeaderCell>{sort_header("description", "Name")}</TableHeaderCell>
                            <TableHeaderCell>{sort_header("data_type", "Type")}</TableHeaderCell>
                            <TableHeaderCell>"Unit"</TableHeaderCell>
                            <TableHeaderCell>"Options"</TableHeaderCell>
                            <TableHeaderCell>"Filterable"</TableHeaderCell>
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
                                            <TableCellLayout>
                                                <Badge variant=BadgeVariant::Primary>{data_type_label(a.data_type)}</Badge>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{a.unit.clone().unwrap_or_default()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{a.options.join(", ")}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{if a.is_filterable { "Yes" } else { "" }}</TableCellLayout>
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
