//! Верхняя панель: переключатель меню, название, счётчик открытых вкладок

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let is_sidebar_visible = move || ctx.left_open.get();
    let open_count = move || ctx.opened.with(|tabs| tabs.len());

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>
                <span class="top-header__title">"Catalog Admin"</span>
            </div>

            <div class="top-header__actions">
                <span class="top-header__counter" title="Open tabs">
                    {icon("layers")}
                    {move || open_count().to_string()}
                </span>
                <button
                    class="top-header__icon-btn"
                    title="Close all tabs"
                    disabled=move || open_count() == 0
                    on:click=move |_| {
                        ctx.opened.set(Vec::new());
                        ctx.active.set(None);
                    }
                >
                    {icon("x")}
                </button>
            </div>
        </div>
    }
}
