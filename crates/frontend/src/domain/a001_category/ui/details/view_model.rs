use crate::shared::api_utils::{fetch_by_id, upsert};
use crate::shared::form_utils::{opt_string, parse_i32};
use contracts::domain::a001_category::aggregate::{Category, CategoryDto};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct CategoryDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub code: RwSignal<String>,
    pub description: RwSignal<String>,
    pub comment: RwSignal<String>,
    pub parent_id: RwSignal<String>,
    pub sort_order: RwSignal<String>,
    pub is_active: RwSignal<bool>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl CategoryDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            code: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            parent_id: RwSignal::new(String::new()),
            sort_order: RwSignal::new("0".to_string()),
            is_active: RwSignal::new(true),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn is_save_disabled(&self) -> Signal<bool> {
        let (saving, description) = (self.saving, self.description);
        Signal::derive(move || saving.get() || description.get().trim().is_empty())
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        this.id.set(Some(id.clone()));
        leptos::task::spawn_local(async move {
            match fetch_by_id::<Category>(Category::collection_name(), &id).await {
                Ok(item) => this.from_aggregate(&item),
                Err(e) => this.error.set(Some(e)),
            }
            this.loading.set(false);
        });
    }

    pub fn save(&self, on_saved: Callback<()>) {
        let dto = match self.to_dto() {
            Ok(dto) => dto,
            Err(msg) => {
                self.error.set(Some(msg));
                return;
            }
        };

        let this = *self;
        this.saving.set(true);
        this.error.set(None);

        leptos::task::spawn_local(async move {
            match upsert(Category::collection_name(), &dto).await {
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

    fn from_aggregate(&self, c: &Category) {
        self.code.set(c.base.code.clone());
        self.description.set(c.base.description.clone());
        self.comment.set(c.base.comment.clone().unwrap_or_default());
        self.parent_id.set(c.parent_id.clone().unwrap_or_default());
        self.sort_order.set(c.sort_order.to_string());
        self.is_active.set(c.is_active);
    }

    fn to_dto(&self) -> Result<CategoryDto, String> {
        let description = self.description.get_untracked().trim().to_string();
        if description.is_empty() {
            return Err("Category name is required".into());
        }
        let id = self.id.get_untracked();
        let parent_id = opt_string(&self.parent_id.get_untracked());
        if parent_id.is_some() && parent_id == id {
            return Err("Category cannot be its own parent".into());
        }
        Ok(CategoryDto {
            id,
            code: opt_string(&self.code.get_untracked()),
            description,
            comment: opt_string(&self.comment.get_untracked()),
            parent_id,
            sort_order: parse_i32("Sort order", &self.sort_order.get_untracked())?,
            is_active: self.is_active.get_untracked(),
        })
    }
}
