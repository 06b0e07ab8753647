use crate::shared::api_utils::{fetch_by_id, upsert};
use crate::shared::form_utils::opt_string;
use contracts::domain::a005_supplier::aggregate::{Supplier, SupplierDto};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct SupplierDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub code: RwSignal<String>,
    pub description: RwSignal<String>,
    pub comment: RwSignal<String>,
    pub contact_name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub phone: RwSignal<String>,
    pub address: RwSignal<String>,
    pub is_active: RwSignal<bool>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl SupplierDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            code: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            contact_name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            address: RwSignal::new(String::new()),
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

    pub fn validate(&self) -> Result<(), String> {
        if self.description.get_untracked().trim().is_empty() {
            return Err("Supplier name is required".into());
        }
        let email = self.email.get_untracked();
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
            match fetch_by_id::<Supplier>(Supplier::collection_name(), &id).await {
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
            match upsert(Supplier::collection_name(), &dto).await {
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

    fn from_aggregate(&self, s: &Supplier) {
        self.code.set(s.base.code.clone());
        self.description.set(s.base.description.clone());
        self.comment.set(s.base.comment.clone().unwrap_or_default());
        self.contact_name.set(s.contact_name.clone().unwrap_or_default());
        self.email.set(s.email.clone().unwrap_or_default());
        self.phone.set(s.phone.clone().unwrap_or_default());
        self.address.set(s.address.clone().unwrap_or_default());
        self.is_active.set(s.is_active);
    }

    fn to_dto(&self) -> SupplierDto {
        SupplierDto {
            id: self.id.get_untracked(),
            code: opt_string(&self.code.get_untracked()),
            description: self.description.get_untracked().trim().to_string(),
            comment: opt_string(&self.comment.get_untracked()),
            contact_name: opt_string(&self.contact_name.get_untracked()),
            email: opt_string(&self.email.get_untracked()),
            phone: opt_string(&self.phone.get_untracked()),
            address: opt_string(&self.address.get_untracked()),
            is_active: self.is_active.get_untracked(),
        }
    }
}
