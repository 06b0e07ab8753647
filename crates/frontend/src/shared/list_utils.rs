/// Утилиты для списков: поиск, сортировка, строка поиска
use leptos::prelude::*;
use std::cmp::Ordering;

/// Строка списка, по которой можно искать
pub trait Searchable {
    /// Текст, в котором ищем (код, наименование, ...)
    fn search_haystack(&self) -> String;

    fn matches_filter(&self, filter: &str) -> bool {
        let needle = filter.trim().to_lowercase();
        needle.is_empty() || self.search_haystack().to_lowercase().contains(&needle)
    }
}

/// Строка списка, которую можно сортировать по полю
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    if filter.trim().is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.matches_filter(filter))
        .collect()
}

/// Регистронезависимое сравнение строк для сортировки
pub fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

pub fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Клик по заголовку: то же поле - меняем направление, другое - сортируем по возрастанию
pub fn toggle_sort(sort_field: RwSignal<String>, sort_ascending: RwSignal<bool>, field: &str) {
    if sort_field.get_untracked() == field {
        sort_ascending.update(|v| *v = !*v);
    } else {
        sort_field.set(field.to_string());
        sort_ascending.set(true);
    }
}

/// Поле поиска с кнопкой очистки
#[component]
pub fn SearchInput(
    value: RwSignal<String>,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let placeholder = placeholder.unwrap_or_else(|| "Search...".to_string());
    let is_active = move || !value.get().trim().is_empty();

    view! {
        <div class="search-input">
            <input
                type="text"
                class="form__input search-input__field"
                class:search-input__field--active=is_active
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <Show when=is_active>
                <button
                    class="search-input__clear"
                    title="Clear"
                    on:click=move |_| value.set(String::new())
                >
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        code: &'static str,
        price: f64,
    }

    impl Searchable for Row {
        fn search_haystack(&self) -> String {
            self.code.to_string()
        }
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "price" => cmp_f64(self.price, other.price),
                _ => cmp_text(self.code, other.code),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { code: "drl-18", price: 120.0 },
            Row { code: "SAW-01", price: 80.0 },
            Row { code: "Drl-12", price: 95.0 },
        ]
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let found = filter_list(rows(), "DRL");
        assert_eq!(found.len(), 2);
        assert_eq!(filter_list(rows(), "  ").len(), 3);
    }

    #[test]
    fn test_sort_by_field_and_direction() {
        let mut items = rows();
        sort_list(&mut items, "price", true);
        assert_eq!(items[0].code, "SAW-01");
        sort_list(&mut items, "code", false);
        assert_eq!(items[0].code, "SAW-01");
        assert_eq!(items[2].code, "Drl-12");
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("code", "code", true), " ▲");
        assert_eq!(get_sort_indicator("code", "code", false), " ▼");
        assert_eq!(get_sort_indicator("code", "price", true), " ⇅");
    }
}
