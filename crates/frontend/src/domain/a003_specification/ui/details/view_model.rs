use crate::shared::api_utils::{fetch_by_id, upsert};
use crate::shared::form_utils::{opt_string, parse_i32};
use contracts::domain::a003_specification::aggregate::{Specification, SpecificationDto};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct SpecificationDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub code: RwSignal<String>,
    pub description: RwSignal<String>,
    pub comment: RwSignal<String>,
    pub category_id: RwSignal<String>,
    pub unit: RwSignal<String>,
    pub sort_order: RwSignal<String>,
    pub is_required: RwSignal<bool>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl SpecificationDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            code: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            category_id: RwSignal::new(String::new()),
            unit: RwSignal::new(String::new()),
            sort_order: RwSignal::new("0".to_string()),
            is_required: RwSignal::new(false),
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
            match fetch_by_id::<Specification>(Specification::collection_name(), &id).await {
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
            match upsert(Specification::collection_name(), &dto).await {
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

    fn from_aggregate(&self, s: &Specification) {
        self.code.set(s.base.code.clone());
        self.description.set(s.base.description.clone());
        self.comment.set(s.base.comment.clone().unwrap_or_default());
        self.category_id.set(s.category_id.clone().unwrap_or_default());
        self.unit.set(s.unit.clone().unwrap_or_default());
        self.sort_order.set(s.sort_order.to_string());
        self.is_required.set(s.is_required);
    }

    fn to_dto(&self) -> Result<SpecificationDto, String> {
        let description = self.description.get_untracked().trim().to_string();
        if description.is_empty() {
            return Err("Specification name is required".into());
        }
        Ok(SpecificationDto {
            id: self.id.get_untracked(),
            code: opt_string(&self.code.get_untracked()),
            description,
            comment: opt_string(&self.comment.get_untracked()),
            category_id: opt_string(&self.category_id.get_untracked()),
            unit: opt_string(&self.unit.get_untracked()),
            sort_order: parse_i32("Sort order", &self.sort_order.get_untracked())?,
            is_required: self.is_required.get_untracked(),
        })
    }
}
