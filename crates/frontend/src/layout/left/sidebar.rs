//! Sidebar: сворачиваемые группы меню, пункт открывает вкладку списка

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct MenuGroup {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub items: Vec<(&'static str, &'static str, &'static str)>, // (tab key, label, icon)
}

pub fn get_menu_groups() -> Vec<MenuGroup> {
    let item = |key: &'static str, icon: &'static str| (key, tab_label_for_key(key), icon);
    vec![
        MenuGroup {
            id: "catalog",
            label: "Catalog",
            icon: "products",
            items: vec![
                item("a001_category", "folder-open"),
                item("a002_attribute", "sliders"),
                item("a003_specification", "list"),
                item("a006_product", "package"),
            ],
        },
        MenuGroup {
            id: "partners",
            label: "Partners",
            icon: "customers",
            items: vec![
                item("a004_manufacturer", "building"),
                item("a005_supplier", "suppliers"),
            ],
        },
        MenuGroup {
            id: "logistics",
            label: "Logistics",
            icon: "shipments",
            items: vec![
                item("a007_warehouse", "inventory"),
                item("a008_servicing_area", "map"),
                item("a009_inventory", "layers"),
            ],
        },
        MenuGroup {
            id: "pricing",
            label: "Pricing",
            icon: "payments",
            items: vec![
                item("a010_pricing_policy", "percent"),
                item("a011_promotion", "tag"),
                item("a012_supplier_pricing", "invoices"),
                item("a013_pricing_rule", "calculator"),
            ],
        },
        MenuGroup {
            id: "system",
            label: "System",
            icon: "settings",
            items: vec![item("sys_logs", "file-text")],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let expanded_groups = RwSignal::new(vec!["catalog".to_string()]);

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups().into_iter().map(|group| {
                let group_id = group.id.to_string();
                let gid_click = group_id.clone();
                let gid_chevron = group_id.clone();
                let items = StoredValue::new(group.items.clone());

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                let gid = gid_click.clone();
                                expanded_groups.update(move |open| {
                                    if let Some(pos) = open.iter().position(|x| x == &gid) {
                                        open.remove(pos);
                                    } else {
                                        open.push(gid);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&gid_chevron)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.get().contains(&group_id)>
                            <div class="app-sidebar__children">
                                {items.get_value().into_iter().map(|(key, label, icon_name)| {
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || {
                                                ctx.active.get().as_deref() == Some(key)
                                            }
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.open_tab(key, label)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{label}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_menu_item_has_a_label() {
        for group in get_menu_groups() {
            for (key, label, _) in group.items {
                assert!(!label.is_empty(), "no label for {key}");
            }
        }
    }

    #[test]
    fn test_menu_keys_are_unique() {
        let mut keys: Vec<&str> = get_menu_groups()
            .into_iter()
            .flat_map(|g| g.items.into_iter().map(|(k, _, _)| k))
            .collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
        assert_eq!(total, 14);
    }
}
