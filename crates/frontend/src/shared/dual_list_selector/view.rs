use super::model::{
    apply_action, browse_rows, scope_summary, search_rows, selected_rows, toggle_expanded,
    BrowseRow, CategoryNode, ProductEntry, ScopeAction, SelectedRow,
};
use crate::shared::icons::icon;
use crate::shared::lookup::load_into;
use contracts::domain::a001_category::aggregate::Category;
use contracts::domain::a006_product::aggregate::Product;
use contracts::domain::common::AggregateRoot;
use contracts::shared::scope::{PricingScope, ScopeItemKind, ScopeState};
use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;

fn state_class(row: &BrowseRow) -> &'static str {
    match (row.state, row.inherited) {
        (ScopeState::Included, _) => "dual-list__row dual-list__row--included",
        (ScopeState::Excluded, _) => "dual-list__row dual-list__row--excluded",
        (_, Some(ScopeState::Excluded)) => "dual-list__row dual-list__row--inherited-excluded",
        (_, Some(ScopeState::Included)) => "dual-list__row dual-list__row--inherited-included",
        _ => "dual-list__row",
    }
}

fn state_hint(row: &BrowseRow) -> &'static str {
    match (row.state, row.inherited) {
        (ScopeState::Included, _) => "included",
        (ScopeState::Excluded, _) => "excluded",
        (_, Some(ScopeState::Excluded)) => "excluded via category",
        (_, Some(ScopeState::Included)) => "included via category",
        _ => "",
    }
}

/// Выбор области действия: каталог слева, включённые/исключённые справа
///
/// Категории и товары загружает сам; правит переданный `scope`.
#[component]
pub fn DualListSelector(scope: RwSignal<PricingScope>) -> impl IntoView {
    let categories = RwSignal::new(Vec::<Category>::new());
    let products = RwSignal::new(Vec::<Product>::new());
    load_into(Category::collection_name(), categories);
    load_into(Product::collection_name(), products);

    let nodes = Memo::new(move |_| {
        categories.with(|list| list.iter().map(CategoryNode::from).collect::<Vec<_>>())
    });
    let entries = Memo::new(move |_| {
        products.with(|list| list.iter().map(ProductEntry::from).collect::<Vec<_>>())
    });

    let expanded = RwSignal::new(HashSet::<String>::new());
    let query = RwSignal::new(String::new());

    let left_rows = Memo::new(move |_| {
        let q = query.get();
        nodes.with(|cats| {
            entries.with(|prods| {
                scope.with(|s| {
                    if q.trim().is_empty() {
                        expanded.with(|open| browse_rows(cats, prods, s, open))
                    } else {
                        search_rows(cats, prods, s, &q)
                    }
                })
            })
        })
    });

    let right = Memo::new(move |_| {
        nodes.with(|cats| entries.with(|prods| scope.with(|s| selected_rows(cats, prods, s))))
    });

    let act = move |action: ScopeAction| scope.update(|s| apply_action(s, &action));

    let render_browse_row = move |row: BrowseRow| {
        let indent = format!("padding-left: {}px;", 8 + row.depth * 18);
        let toggle_id = row.id.clone();
        let include_id = row.id.clone();
        let exclude_id = row.id.clone();
        let kind = row.kind;
        let chevron = if row.has_children {
            let name = if row.expanded { "chevron-down" } else { "chevron-right" };
            view! {
                <span
                    class="dual-list__toggle"
                    on:click=move |_| expanded.update(|set| toggle_expanded(set, &toggle_id))
                >
                    {icon(name)}
                </span>
            }
            .into_any()
        } else {
            view! { <span class="dual-list__toggle dual-list__toggle--empty"></span> }.into_any()
        };
        let kind_icon = match kind {
            ScopeItemKind::Category if row.expanded => icon("folder-open"),
            ScopeItemKind::Category => icon("folder-closed"),
            ScopeItemKind::Product => icon("package"),
        };

        view! {
            <div class=state_class(&row) style=indent>
                {chevron}
                {kind_icon}
                <span class="dual-list__label">{row.label.clone()}</span>
                {row.secondary.clone().map(|s| view! { <span class="dual-list__secondary">{s}</span> })}
                <span class="dual-list__hint">{state_hint(&row)}</span>
                <div class="dual-list__actions">
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        disabled={row.state == ScopeState::Included}
                        on_click=move |_| act(ScopeAction::Include(kind, include_id.clone()))
                    >
                        {icon("check")}
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        disabled={row.state == ScopeState::Excluded}
                        on_click=move |_| act(ScopeAction::Exclude(kind, exclude_id.clone()))
                    >
                        {icon("ban")}
                    </Button>
                </div>
            </div>
        }
    };

    let render_selected_row = move |row: SelectedRow| {
        let kind = row.kind;
        let id = row.id.clone();
        let kind_icon = match kind {
            ScopeItemKind::Category => icon("folder-closed"),
            ScopeItemKind::Product => icon("package"),
        };
        view! {
            <div class="dual-list__row">
                {kind_icon}
                <span class="dual-list__label">{row.label}</span>
                <div class="dual-list__actions">
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| act(ScopeAction::Remove(kind, id.clone()))
                    >
                        {icon("x")}
                    </Button>
                </div>
            </div>
        }
    };

    view! {
        <div class="dual-list">
            <div class="dual-list__toolbar">
                <span class="dual-list__summary">{move || scope.with(scope_summary)}</span>
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || scope.with(|s| s.is_empty()))
                    on_click=move |_| act(ScopeAction::Clear)
                >
                    {icon("delete")}
                    " Clear"
                </Button>
            </div>
            <div class="dual-list__panes">
                <div class="dual-list__pane">
                    <div class="dual-list__pane-header">
                        <Input value=query placeholder="Search categories and products..." />
                    </div>
                    <div class="dual-list__pane-body">
                        {move || {
                            let rows = left_rows.get();
                            if rows.is_empty() {
                                let text = if query.with(|q| q.trim().is_empty()) {
                                    "Catalog is empty"
                                } else {
                                    "Nothing found"
                                };
                                view! { <div class="dual-list__empty">{text}</div> }.into_any()
                            } else {
                                rows.into_iter().map(render_browse_row).collect_view().into_any()
                            }
                        }}
                    </div>
                </div>
                <div class="dual-list__pane">
                    <div class="dual-list__pane-header">
                        <h4 class="details-section__title">"Included"</h4>
                    </div>
                    <div class="dual-list__pane-body">
                        {move || {
                            let rows = right.get().included;
                            if rows.is_empty() {
                                view! { <div class="dual-list__empty">"Nothing included: all products"</div> }
                                    .into_any()
                            } else {
                                rows.into_iter().map(render_selected_row).collect_view().into_any()
                            }
                        }}
                    </div>
                    <div class="dual-list__pane-header">
                        <h4 class="details-section__title">"Excluded"</h4>
                    </div>
                    <div class="dual-list__pane-body">
                        {move || {
                            let rows = right.get().excluded;
                            if rows.is_empty() {
                                view! { <div class="dual-list__empty">"Nothing excluded"</div> }.into_any()
                            } else {
                                rows.into_iter().map(render_selected_row).collect_view().into_any()
                            }
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}
