//! Справочники для выпадающих списков (категории, производители, склады, ...)

use crate::shared::api_utils::fetch_list;
use contracts::domain::a001_category::aggregate::Category;
use contracts::domain::common::{AggregateId, AggregateRoot};
use contracts::shared::hierarchy::{build_tree, descendants_of, flatten};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct LookupItem {
    pub id: String,
    pub label: String,
}

/// Опции из списка агрегатов: наименование, с кодом в скобках при `with_code`
pub fn lookup_items<T>(items: &[T], with_code: bool) -> Vec<LookupItem>
where
    T: AggregateRoot,
    T::Id: AggregateId,
{
    let mut out: Vec<LookupItem> = items
        .iter()
        .map(|item| LookupItem {
            id: item.id().as_string(),
            label: if with_code && !item.code().is_empty() {
                format!("{} ({})", item.description(), item.code())
            } else {
                item.description().to_string()
            },
        })
        .collect();
    out.sort_by_key(|i| i.label.to_lowercase());
    out
}

/// Категории в порядке дерева с отступом по глубине
///
/// `exclude_subtree` - категория, которую нельзя выбрать родителем
/// (она сама и её потомки).
pub fn category_options(categories: &[Category], exclude_subtree: Option<&str>) -> Vec<LookupItem> {
    let blocked: Vec<String> = match exclude_subtree {
        Some(id) => {
            let mut ids = descendants_of(categories, id);
            ids.push(id.to_string());
            ids
        }
        None => Vec::new(),
    };

    let tree = build_tree(categories.to_vec());
    flatten(&tree, None)
        .into_iter()
        .filter(|row| !blocked.contains(&row.item.to_string_id()))
        .map(|row| LookupItem {
            id: row.item.to_string_id(),
            label: format!("{}{}", "\u{00a0}\u{00a0}".repeat(row.depth), row.item.base.description),
        })
        .collect()
}

pub fn name_map(items: &[LookupItem]) -> HashMap<String, String> {
    items
        .iter()
        .map(|i| (i.id.clone(), i.label.trim_start_matches('\u{00a0}').to_string()))
        .collect()
}

/// Подпись для id: пусто -> «-», неизвестный id -> его начало
pub fn label_for(names: &HashMap<String, String>, id: Option<&str>) -> String {
    match id.map(str::trim).filter(|s| !s.is_empty()) {
        None => "-".to_string(),
        Some(id) => names
            .get(id)
            .cloned()
            .unwrap_or_else(|| format!("[{}]", id.get(..8).unwrap_or(id))),
    }
}

/// Загрузить коллекцию в сигнал; ошибки только в лог
pub fn load_into<T>(collection: &'static str, target: RwSignal<Vec<T>>)
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    leptos::task::spawn_local(async move {
        match fetch_list::<T>(collection).await {
            Ok(items) => target.set(items),
            Err(e) => log::warn!("lookup {} failed: {}", collection, e),
        }
    });
}

/// Выпадающий список с пустым вариантом
#[component]
pub fn LookupSelect(
    value: RwSignal<String>,
    #[prop(into)] options: Signal<Vec<LookupItem>>,
    #[prop(optional)] empty_label: Option<&'static str>,
) -> impl IntoView {
    let empty_label = empty_label.unwrap_or("(none)");
    view! {
        <select
            class="form__input form__select"
            prop:value=move || value.get()
            on:change=move |ev| value.set(event_target_value(&ev))
        >
            <option value="">{empty_label}</option>
            {move || {
                let current = value.get_untracked();
                options
                    .get()
                    .into_iter()
                    .map(|o| {
                        let selected = o.id == current;
                        view! { <option value=o.id selected=selected>{o.label}</option> }
                    })
                    .collect_view()
            }}
        </select>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_category::aggregate::CategoryDto;

    fn category(name: &str, parent: Option<&Category>) -> Category {
        Category::new_for_insert(&CategoryDto {
            description: name.into(),
            parent_id: parent.map(|p| p.to_string_id()),
            ..Default::default()
        })
    }

    #[test]
    fn test_category_options_indent_and_exclude_subtree() {
        let tools = category("Tools", None);
        let drills = category("Drills", Some(&tools));
        let garden = category("Garden", None);
        let all = vec![drills.clone(), garden.clone(), tools.clone()];

        let options = category_options(&all, None);
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Garden", "Tools", "\u{a0}\u{a0}Drills"]);

        let options = category_options(&all, Some(&tools.to_string_id()));
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].id, garden.to_string_id());
    }

    #[test]
    fn test_label_for() {
        let names = name_map(&[LookupItem {
            id: "abc".into(),
            label: "\u{a0}\u{a0}Drills".into(),
        }]);
        assert_eq!(label_for(&names, Some("abc")), "Drills");
        assert_eq!(label_for(&names, None), "-");
        assert_eq!(label_for(&names, Some("  ")), "-");
        assert_eq!(label_for(&names, Some("0123456789")), "[01234567]");
    }
}
