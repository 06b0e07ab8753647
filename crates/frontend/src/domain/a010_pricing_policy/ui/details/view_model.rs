use crate::shared::api_utils::{fetch_by_id, upsert};
use crate::shared::form_utils::{format_date, format_number, opt_string, parse_date, parse_f64, parse_i32};
use contracts::domain::a010_pricing_policy::aggregate::{PricingPolicy, PricingPolicyDto};
use contracts::domain::common::AggregateRoot;
use contracts::shared::pricing::{AdjustmentKind, PriceAdjustment};
use contracts::shared::scope::PricingScope;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct PricingPolicyDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub code: RwSignal<String>,
    pub description: RwSignal<String>,
    pub comment: RwSignal<String>,
    pub adjustment_kind: RwSignal<String>,
    pub adjustment_value: RwSignal<String>,
    pub priority: RwSignal<String>,
    pub is_active: RwSignal<bool>,
    pub valid_from: RwSignal<String>,
    pub valid_to: RwSignal<String>,
    pub scope: RwSignal<PricingScope>,

    pub active_tab: RwSignal<&'static str>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl PricingPolicyDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            code: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            adjustment_kind: RwSignal::new(AdjustmentKind::Percent.as_str().to_string()),
            adjustment_value: RwSignal::new("0".to_string()),
            priority: RwSignal::new("0".to_string()),
            is_active: RwSignal::new(true),
            valid_from: RwSignal::new(String::new()),
            valid_to: RwSignal::new(String::new()),
            scope: RwSignal::new(PricingScope::default()),
            active_tab: RwSignal::new("general"),
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
            match fetch_by_id::<PricingPolicy>(PricingPolicy::collection_name(), &id).await {
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
            match upsert(PricingPolicy::collection_name(), &dto).await {
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

    fn from_aggregate(&self, p: &PricingPolicy) {
        self.code.set(p.base.code.clone());
        self.description.set(p.base.description.clone());
        self.comment.set(p.base.comment.clone().unwrap_or_default());
        self.adjustment_kind.set(p.adjustment.kind.as_str().to_string());
        self.adjustment_value.set(format_number(p.adjustment.value));
        self.priority.set(p.priority.to_string());
        self.is_active.set(p.is_active);
        self.valid_from.set(format_date(p.valid_from));
        self.valid_to.set(format_date(p.valid_to));
        self.scope.set(p.scope.clone());
    }

    fn to_dto(&self) -> Result<PricingPolicyDto, String> {
        let description = self.description.get_untracked().trim().to_string();
        if description.is_empty() {
            return Err("Policy name is required".into());
        }
        let adjustment = PriceAdjustment {
            kind: AdjustmentKind::parse(&self.adjustment_kind.get_untracked()).unwrap_or_default(),
            value: parse_f64("Adjustment", &self.adjustment_value.get_untracked())?,
        };
        adjustment.validate()?;
        let valid_from = parse_date("Valid from", &self.valid_from.get_untracked())?;
        let valid_to = parse_date("Valid to", &self.valid_to.get_untracked())?;
        if let (Some(from), Some(to)) = (valid_from, valid_to) {
            if to < from {
                return Err("Valid-to date is before valid-from date".into());
            }
        }

        Ok(PricingPolicyDto {
            id: self.id.get_untracked(),
            code: opt_string(&self.code.get_untracked()),
            description,
            comment: opt_string(&self.comment.get_untracked()),
            adjustment,
            priority: parse_i32("Priority", &self.priority.get_untracked())?,
            is_active: self.is_active.get_untracked(),
            valid_from,
            valid_to,
            scope: self.scope.get_untracked().normalized(),
        })
    }
}
