use crate::shared::api_utils::{fetch_by_id, upsert};
use crate::shared::form_utils::{join_list, opt_string, parse_i32, split_list};
use contracts::domain::a008_servicing_area::aggregate::{ServicingArea, ServicingAreaDto};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct ServicingAreaDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub code: RwSignal<String>,
    pub description: RwSignal<String>,
    pub comment: RwSignal<String>,
    pub region: RwSignal<String>,
    /// Индексы через запятую или с новой строки
    pub postal_codes: RwSignal<String>,
    pub delivery_days: RwSignal<String>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl ServicingAreaDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            code: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            region: RwSignal::new(String::new()),
            postal_codes: RwSignal::new(String::new()),
            delivery_days: RwSignal::new("1".to_string()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn is_save_disabled(&self) -> Signal<bool> {
        let (saving, description) = (self.saving, self.description);
        Signal::derive(move || saving.get() || description.get().trim().is_empty())
    }

    pub fn postal_count(&self) -> Signal<usize> {
        let postal_codes = self.postal_codes;
        Signal::derive(move || postal_codes.with(|t| split_list(t).len()))
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        this.id.set(Some(id.clone()));
        leptos::task::spawn_local(async move {
            match fetch_by_id::<ServicingArea>(ServicingArea::collection_name(), &id).await {
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
            match upsert(ServicingArea::collection_name(), &dto).await {
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

    fn from_aggregate(&self, a: &ServicingArea) {
        self.code.set(a.base.code.clone());
        self.description.set(a.base.description.clone());
        self.comment.set(a.base.comment.clone().unwrap_or_default());
        self.region.set(a.region.clone().unwrap_or_default());
        self.postal_codes.set(join_list(&a.postal_codes));
        self.delivery_days.set(a.delivery_days.to_string());
    }

    fn to_dto(&self) -> Result<ServicingAreaDto, String> {
        let description = self.description.get_untracked().trim().to_string();
        if description.is_empty() {
            return Err("Area name is required".into());
        }
        let delivery_days = parse_i32("Delivery days", &self.delivery_days.get_untracked())?;
        if delivery_days < 0 {
            return Err("Delivery days cannot be negative".into());
        }
        Ok(ServicingAreaDto {
            id: self.id.get_untracked(),
            code: opt_string(&self.code.get_untracked()),
            description,
            comment: opt_string(&self.comment.get_untracked()),
            region: opt_string(&self.region.get_untracked()),
            postal_codes: split_list(&self.postal_codes.get_untracked()),
            delivery_days,
        })
    }
}
