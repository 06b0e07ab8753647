//! Выбор строк в таблицах списков: чекбокс в заголовке и в строке

use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    None,
    All,
    Partial,
}

/// Состояние чекбокса «выбрать все» для видимых строк
pub fn selection_state(ids: &[String], selected: &HashSet<String>) -> SelectionState {
    if ids.is_empty() {
        return SelectionState::None;
    }
    let count = ids.iter().filter(|id| selected.contains(*id)).count();
    if count == 0 {
        SelectionState::None
    } else if count == ids.len() {
        SelectionState::All
    } else {
        SelectionState::Partial
    }
}

/// Переключение одной строки
pub fn toggle_id(selected: &mut HashSet<String>, id: &str, checked: bool) {
    if checked {
        selected.insert(id.to_string());
    } else {
        selected.remove(id);
    }
}

/// Чекбокс в заголовке: unchecked / checked / indeterminate
#[component]
pub fn TableHeaderCheckbox(
    /// ID видимых строк
    #[prop(into)]
    ids: Signal<Vec<String>>,
    selected: RwSignal<HashSet<String>>,
) -> impl IntoView {
    let state = Signal::derive(move || selected.with(|sel| selection_state(&ids.get(), sel)));
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        if let Some(input) = checkbox_ref.get() {
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(state.get() == SelectionState::Partial);
            }
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || state.get() == SelectionState::All
                on:change=move |ev| {
                    if event_target_checked(&ev) {
                        selected.set(ids.get_untracked().into_iter().collect());
                    } else {
                        selected.set(HashSet::new());
                    }
                }
            />
        </TableHeaderCell>
    }
}

/// Чекбокс строки; клик не доходит до обработчика строки
#[component]
pub fn TableCellCheckbox(
    #[prop(into)] item_id: String,
    selected: RwSignal<HashSet<String>>,
) -> impl IntoView {
    let id = StoredValue::new(item_id);

    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || selected.with(|s| s.contains(&id.get_value()))
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    selected.update(|s| toggle_id(s, &id.get_value(), checked));
                }
            />
        </TableCell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_selection_state() {
        let rows = ids(&["a", "b", "c"]);
        let mut sel = HashSet::new();
        assert_eq!(selection_state(&rows, &sel), SelectionState::None);
        toggle_id(&mut sel, "a", true);
        assert_eq!(selection_state(&rows, &sel), SelectionState::Partial);
        toggle_id(&mut sel, "b", true);
        toggle_id(&mut sel, "c", true);
        assert_eq!(selection_state(&rows, &sel), SelectionState::All);
        toggle_id(&mut sel, "a", false);
        assert_eq!(selection_state(&rows, &sel), SelectionState::Partial);
    }

    #[test]
    fn test_selection_ignores_hidden_rows() {
        let rows = ids(&["a"]);
        let sel: HashSet<String> = ids(&["x", "y"]).into_iter().collect();
        assert_eq!(selection_state(&rows, &sel), SelectionState::None);
        assert_eq!(selection_state(&[], &sel), SelectionState::None);
    }
}
