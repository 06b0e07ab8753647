//! Состояние страницы списка: строки, ошибка, выбор, фильтр
//!
//! Список перечитывает данные при открытии и после каждого
//! `AppGlobalContext::notify_saved()` (сохранение или удаление в любой вкладке).

use crate::layout::global_context::AppGlobalContext;
use crate::shared::api_utils::{delete_many, fetch_list};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use std::collections::HashSet;

pub struct ListState<T: Send + Sync + 'static> {
    pub items: RwSignal<Vec<T>>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub selected: RwSignal<HashSet<String>>,
    pub filter: RwSignal<String>,
    collection: &'static str,
}

impl<T: Send + Sync + 'static> Clone for ListState<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListState<T> {}

impl<T> ListState<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    pub fn new(collection: &'static str) -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            selected: RwSignal::new(HashSet::new()),
            filter: RwSignal::new(String::new()),
            collection,
        }
    }

    /// Подписка на `data_version`; первая загрузка сразу
    pub fn bind(self, ctx: AppGlobalContext) -> Self {
        Effect::new(move |_| {
            ctx.data_version.track();
            self.reload();
        });
        self
    }

    pub fn reload(&self) {
        let this = *self;
        this.loading.set(true);
        leptos::task::spawn_local(async move {
            match fetch_list::<T>(this.collection).await {
                Ok(items) => {
                    this.items.set(items);
                    this.error.set(None);
                }
                Err(e) => {
                    log::error!("load {} failed: {}", this.collection, e);
                    this.error.set(Some(e));
                }
            }
            this.loading.set(false);
        });
    }

    /// Удалить выбранные после подтверждения
    pub fn delete_selected(&self, ctx: AppGlobalContext) {
        let ids: Vec<String> = self.selected.get_untracked().into_iter().collect();
        if ids.is_empty() || !confirm(&delete_prompt(ids.len())) {
            return;
        }

        let this = *self;
        leptos::task::spawn_local(async move {
            let result = delete_many(this.collection, ids).await;
            this.selected.set(HashSet::new());
            if let Err(e) = result {
                this.error.set(Some(e));
            }
            ctx.notify_saved();
        });
    }
}

pub fn delete_prompt(count: usize) -> String {
    if count == 1 {
        "Delete the selected item?".to_string()
    } else {
        format!("Delete {} selected items?", count)
    }
}

/// Браузерный confirm; без window считаем отказом
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_prompt() {
        assert_eq!(delete_prompt(1), "Delete the selected item?");
        assert_eq!(delete_prompt(3), "Delete 3 selected items?");
    }
}
