use crate::shared::api_utils::{fetch_by_id, upsert};
use crate::shared::form_utils::opt_string;
use contracts::domain::a004_manufacturer::aggregate::{Manufacturer, ManufacturerDto};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct ManufacturerDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub code: RwSignal<String>,
    pub description: RwSignal<String>,
    pub comment: RwSignal<String>,
    pub website: RwSignal<String>,
    pub country: RwSignal<String>,
    pub contact_email: RwSignal<String>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl ManufacturerDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            code: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            website: RwSignal::new(String::new()),
            country: RwSignal::new(String::new()),
            contact_email: RwSignal::new(String::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn is_save_disabled(&self) -> Signal<bool> {
        let (saving, description) = (self.saving, self.description);
        Signal::derive(move || saving.get() || description.get().trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.description.get_untracked().trim().is_empty() {
            return Err("Manufacturer name is required".into());
        }
        let email = self.contact_email.get_untracked();
        if !email.trim().is_empty() && !email.contains('@') {
            return Err(format!("'{}' is not a valid e-mail", email.trim()));
        }
        Ok(())
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        this.id.set(Some(id.clone()));
        leptos::task::spawn_local(async move {
            match fetch_by_id::<Manufacturer>(Manufacturer::collection_name(), &id).await {
                Ok(item) => this.from_aggregate(&item),
                Err(e) => this.error.set(Some(e)),
            }
            this.loading.set(false);
        });
    }

    pub fn save(&self, on_saved: Callback<()>) {
        if let Err(msg) = self.validate() {
            self.error.set(Some(msg));
            return;
        }

        let this = *self;
        this.saving.set(true);
        this.error.set(None);
        let dto = this.to_dto();

        leptos::task::spawn_local(async move {
            match upsert(Manufacturer::collection_name(), &dto).await {
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

    fn from_aggregate(&self, m: &Manufacturer) {
        self.code.set(m.base.code.clone());
        self.description.set(m.base.description.clone());
        self.comment.set(m.base.comment.clone().unwrap_or_default());
        self.website.set(m.website.clone().unwrap_or_default());
        self.country.set(m.country.clone().unwrap_or_default());
        self.contact_email.set(m.contact_email.clone().unwrap_or_default());
    }

    fn to_dto(&self) -> ManufacturerDto {
        ManufacturerDto {
            id: self.id.get_untracked(),
            code: opt_string(&self.code.get_untracked()),
            description: self.description.get_untracked().trim().to_string(),
            comment: opt_string(&self.comment.get_untracked()),
            website: opt_string(&self.website.get_untracked()),
            country: opt_string(&self.country.get_untracked()),
            contact_email: opt_string(&self.contact_email.get_untracked()),
        }
    }
}
