use crate::shared::api_utils::{fetch_by_id, upsert};
use crate::shared::form_utils::{format_number, opt_string, parse_f64, parse_i32};
use contracts::domain::a012_supplier_pricing::aggregate::{SupplierPricing, SupplierPricingDto};
use contracts::domain::common::AggregateRoot;
use contracts::shared::scope::PricingScope;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct SupplierPricingDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub code: RwSignal<String>,
    pub description: RwSignal<String>,
    pub comment: RwSignal<String>,
    pub supplier_id: RwSignal<String>,
    pub discount_percent: RwSignal<String>,
    pub min_order_qty: RwSignal<String>,
    pub lead_time_days: RwSignal<String>,
    pub is_active: RwSignal<bool>,
    pub scope: RwSignal<PricingScope>,

    pub active_tab: RwSignal<&'static str>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl SupplierPricingDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            code: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            supplier_id: RwSignal::new(String::new()),
            discount_percent: RwSignal::new("0".to_string()),
            min_order_qty: RwSignal::new("0".to_string()),
            lead_time_days: RwSignal::new("0".to_string()),
            is_active: RwSignal::new(true),
            scope: RwSignal::new(PricingScope::default()),
            active_tab: RwSignal::new("general"),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn is_save_disabled(&self) -> Signal<bool> {
        let (saving, supplier_id) = (self.saving, self.supplier_id);
        Signal::derive(move || saving.get() || supplier_id.get().trim().is_empty())
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        this.id.set(Some(id.clone()));
        leptos::task::spawn_local(async move {
            match fetch_by_id::<SupplierPricing>(SupplierPricing::collection_name(), &id).await {
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
            match upsert(SupplierPricing::collection_name(), &dto).await {
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

    fn from_aggregate(&self, sp: &SupplierPricing) {
        self.code.set(sp.base.code.clone());
        self.description.set(sp.base.description.clone());
        self.comment.set(sp.base.comment.clone().unwrap_or_default());
        self.supplier_id.set(sp.supplier_id.clone());
        self.discount_percent.set(format_number(sp.discount_percent));
        self.min_order_qty.set(sp.min_order_qty.to_string());
        self.lead_time_days.set(sp.lead_time_days.to_string());
        self.is_active.set(sp.is_active);
        self.scope.set(sp.scope.clone());
    }

    fn to_dto(&self) -> Result<SupplierPricingDto, String> {
        let supplier_id = self.supplier_id.get_untracked().trim().to_string();
        if supplier_id.is_empty() {
            return Err("Supplier is required".into());
        }
        let discount_percent = parse_f64("Discount", &self.discount_percent.get_untracked())?;
        if !(0.0..=100.0).contains(&discount_percent) {
            return Err("Discount must be between 0 and 100 percent".into());
        }
        let min_order_qty = parse_i32("Minimum order", &self.min_order_qty.get_untracked())?;
        let lead_time_days = parse_i32("Lead time", &self.lead_time_days.get_untracked())?;
        if min_order_qty < 0 || lead_time_days < 0 {
            return Err("Minimum order and lead time cannot be negative".into());
        }

        Ok(SupplierPricingDto {
            id: self.id.get_untracked(),
            code: opt_string(&self.code.get_untracked()),
            description: self.description.get_untracked().trim().to_string(),
            comment: opt_string(&self.comment.get_untracked()),
            supplier_id,
            discount_percent,
            min_order_qty,
            lead_time_days,
            is_active: self.is_active.get_untracked(),
            scope: self.scope.get_untracked().normalized(),
        })
    }
}
