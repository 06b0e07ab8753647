//! PageFrame - корневая обёртка каждой страницы во вкладке.
//!
//! На корневом элементе всегда есть `id` вида `"{entity}--{category}"`
//! (например `"a006_product--list"`) и `data-page-category`.

use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

pub const PAGE_CAT_LIST: &str = "list";
pub const PAGE_CAT_DETAIL: &str = "detail";
pub const PAGE_CAT_SYSTEM: &str = "system";

fn page_class(category: &str) -> &'static str {
    match category {
        PAGE_CAT_DETAIL => "page page--detail",
        _ => "page",
    }
}

#[component]
pub fn PageFrame(
    /// `{entity}--{category}`
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants
    category: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div id=page_id class=page_class(category) data-page-category=category>
            {children()}
        </div>
    }
}

/// Заголовок страницы списка: название и кнопки справа
#[component]
pub fn ListHeader(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h1 class="page__title">{title}</h1>
            </div>
            <div class="page__header-right">{children()}</div>
        </div>
    }
}

/// Заголовок карточки: название, Save и Close
#[component]
pub fn DetailHeader(
    #[prop(into)] title: Signal<String>,
    #[prop(into)] saving: Signal<bool>,
    #[prop(into)] save_disabled: Signal<bool>,
    on_save: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h2>{move || title.get()}</h2>
            </div>
            <div class="page__header-right">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| on_save.run(())
                    disabled=save_disabled
                >
                    {icon("save")}
                    {move || if saving.get() { " Saving..." } else { " Save" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    {icon("x")}
                    " Close"
                </Button>
            </div>
        </div>
    }
}

/// Панель вкладок карточки: активная кнопка - Primary
#[component]
pub fn DetailTabBar(
    active: RwSignal<&'static str>,
    /// (ключ, подпись)
    tabs: Vec<(&'static str, Signal<String>)>,
) -> impl IntoView {
    view! {
        <div class="detail-tabs">
            {tabs
                .into_iter()
                .map(|(key, label)| {
                    view! {
                        <Button
                            appearance=Signal::derive(move || {
                                if active.get() == key {
                                    ButtonAppearance::Primary
                                } else {
                                    ButtonAppearance::Subtle
                                }
                            })
                            size=ButtonSize::Small
                            on_click=move |_| active.set(key)
                        >
                            {move || label.get()}
                        </Button>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Блок ошибки, общий для списков и карточек
#[component]
pub fn ErrorBox(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="warning-box" style="background: var(--color-error-50); border-color: var(--color-error-100); margin: var(--spacing-md) 0;">
            <span class="warning-box__icon" style="color: var(--color-error);">"⚠"</span>
            <span class="warning-box__text" style="color: var(--color-error);">{message}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_class() {
        assert_eq!(page_class(PAGE_CAT_DETAIL), "page page--detail");
        assert_eq!(page_class(PAGE_CAT_LIST), "page");
        assert_eq!(page_class(PAGE_CAT_SYSTEM), "page");
    }
}
