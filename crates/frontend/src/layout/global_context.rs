use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Состояние рабочей области: открытые вкладки, активная вкладка, панели
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
    /// Растёт после каждого успешного сохранения/удаления; списки перечитывают данные
    pub data_version: RwSignal<u64>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
            data_version: RwSignal::new(0),
        }
    }

    /// Синхронизация активной вкладки с `?active=` в адресной строке
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(active_key) = params.get("active").cloned() {
            let title = crate::layout::tabs::title_for_key(&active_key);
            self.open_tab(&active_key, &title);
        }

        let this = *self;
        Effect::new(move |_| {
            if let Some(active_key) = this.active.get() {
                let query_string =
                    serde_qs::to_string(&HashMap::from([("active".to_string(), active_key)]))
                        .unwrap_or_default();
                let new_url = format!("?{}", query_string);

                let current_search = window()
                    .and_then(|w| w.location().search().ok())
                    .unwrap_or_default();

                if current_search != new_url {
                    if let Some(w) = window() {
                        if let Ok(history) = w.history() {
                            let _ = history.replace_state_with_url(
                                &wasm_bindgen::JsValue::NULL,
                                "",
                                Some(&new_url),
                            );
                        }
                    }
                }
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        log::debug!("open_tab: key='{}', title='{}'", key, title);
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            self.opened.update(|tabs| {
                tabs.push(Tab {
                    key: key.to_string(),
                    title: title.to_string(),
                })
            });
        }
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn update_tab_title(&self, key: &str, new_title: &str) {
        self.opened.update(|tabs| {
            if let Some(tab) = tabs.iter_mut().find(|t| t.key == key) {
                tab.title = new_title.to_string();
            }
        });
    }

    pub fn close_tab(&self, key: &str) {
        log::debug!("close_tab: key='{}'", key);
        let active = self.active.get_untracked();
        let next = self
            .opened
            .with_untracked(|tabs| next_active_after_close(tabs, active.as_deref(), key));
        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        self.active.set(next);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }

    /// Заголовок вкладки карточки следует за наименованием записи
    pub fn follow_tab_title(&self, key: String, entity_label: &'static str, name: Signal<String>) {
        let this = *self;
        Effect::new(move |_| {
            let name = name.get();
            if !name.trim().is_empty() {
                this.update_tab_title(&key, &super::tabs::detail_tab_label(entity_label, name.trim()));
            }
        });
    }

    /// Сообщить спискам, что данные изменились
    pub fn notify_saved(&self) {
        self.data_version.update(|v| *v += 1);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

/// Какая вкладка станет активной после закрытия `closing`.
///
/// Закрытие неактивной вкладки активную не меняет; при закрытии активной
/// активируется соседняя справа, если её нет - слева.
pub fn next_active_after_close(
    tabs: &[Tab],
    active: Option<&str>,
    closing: &str,
) -> Option<String> {
    if active != Some(closing) {
        return active.map(str::to_string);
    }
    let pos = tabs.iter().position(|t| t.key == closing)?;
    tabs.get(pos + 1)
        .or_else(|| pos.checked_sub(1).and_then(|p| tabs.get(p)))
        .map(|t| t.key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs(keys: &[&str]) -> Vec<Tab> {
        keys.iter()
            .map(|k| Tab {
                key: k.to_string(),
                title: k.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_closing_inactive_tab_keeps_active() {
        let t = tabs(&["a", "b", "c"]);
        assert_eq!(
            next_active_after_close(&t, Some("a"), "c"),
            Some("a".to_string())
        );
    }

    #[test]
    fn test_closing_active_tab_prefers_right_neighbour() {
        let t = tabs(&["a", "b", "c"]);
        assert_eq!(
            next_active_after_close(&t, Some("b"), "b"),
            Some("c".to_string())
        );
        assert_eq!(
            next_active_after_close(&t, Some("c"), "c"),
            Some("b".to_string())
        );
    }

    #[test]
    fn test_closing_last_tab_leaves_nothing_active() {
        let t = tabs(&["only"]);
        assert_eq!(next_active_after_close(&t, Some("only"), "only"), None);
    }
}
