use crate::shared::api_utils::{fetch_by_id, upsert};
use crate::shared::form_utils::opt_string;
use contracts::domain::a007_warehouse::aggregate::{Warehouse, WarehouseDto};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct WarehouseDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub code: RwSignal<String>,
    pub description: RwSignal<String>,
    pub comment: RwSignal<String>,
    pub address: RwSignal<String>,
    pub is_active: RwSignal<bool>,
    pub servicing_area_ids: RwSignal<Vec<String>>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl WarehouseDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            code: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            address: RwSignal::new(String::new()),
            is_active: RwSignal::new(true),
            servicing_area_ids: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn is_save_disabled(&self) -> Signal<bool> {
        let (saving, description) = (self.saving, self.description);
        Signal::derive(move || saving.get() || description.get().trim().is_empty())
    }

    pub fn has_area(&self, area_id: &str) -> bool {
        self.servicing_area_ids.with(|ids| ids.iter().any(|i| i == area_id))
    }

    pub fn toggle_area(&self, area_id: &str) {
        self.servicing_area_ids.update(|ids| toggle_id(ids, area_id));
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        this.id.set(Some(id.clone()));
        leptos::task::spawn_local(async move {
            match fetch_by_id::<Warehouse>(Warehouse::collection_name(), &id).await {
                Ok(item) => this.from_aggregate(&item),
                Err(e) => this.error.set(Some(e)),
            }
            this.loading.set(false);
        });
    }

    pub fn save(&self, on_saved: Callback<()>) {
        let description = self.description.get_untracked().trim().to_string();
        if description.is_empty() {
            self.error.set(Some("Warehouse name is required".into()));
            return;
        }
        let dto = WarehouseDto {
            id: self.id.get_untracked(),
            code: opt_string(&self.code.get_untracked()),
            description,
            comment: opt_string(&self.comment.get_untracked()),
            address: opt_string(&self.address.get_untracked()),
            is_active: self.is_active.get_untracked(),
            servicing_area_ids: self.servicing_area_ids.get_untracked(),
        };

        let this = *self;
        this.saving.set(true);
        this.error.set(None);

        leptos::task::spawn_local(async move {
            match upsert(Warehouse::collection_name(), &dto).await {
                Ok(new_id) => {
                    this.id.set(Some(new_id));
                    this.saving.set(false);
                    on_saved.run(());
                }
                Err(e) => {
                    this.saving.set(false);
                    this.error.set(Some(e));
                }
            }
        });
    }

    fn from_aggregate(&self, w: &Warehouse) {
        self.code.set(w.base.code.clone());
        self.description.set(w.base.description.clone());
        self.comment.set(w.base.comment.clone().unwrap_or_default());
        self.address.set(w.address.clone().unwrap_or_default());
        self.is_active.set(w.is_active);
        self.servicing_area_ids.set(w.servicing_area_ids.clone());
    }
}

fn toggle_id(ids: &mut Vec<String>, id: &str) {
    match ids.iter().position(|i| i == id) {
        Some(pos) => {
            ids.remove(pos);
        }
        None => ids.push(id.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_id() {
        let mut ids = vec!["a".to_string()];
        toggle_id(&mut ids, "b");
        assert_eq!(ids, vec!["a", "b"]);
        toggle_id(&mut ids, "a");
        assert_eq!(ids, vec!["b"]);
    }
}
