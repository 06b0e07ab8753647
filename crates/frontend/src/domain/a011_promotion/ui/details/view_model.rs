use crate::shared::api_utils::{fetch_by_id, upsert};
use crate::shared::form_utils::{format_date, format_number, opt_string, parse_date, parse_f64};
use contracts::domain::a011_promotion::aggregate::{Promotion, PromotionDto};
use contracts::domain::common::AggregateRoot;
use contracts::shared::pricing::{AdjustmentKind, PriceAdjustment};
use contracts::shared::scope::PricingScope;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct PromotionDetailsVm {
    pub id: RwSignal<Option<String>>,
    /// Промокод
    pub code: RwSignal<String>,
    pub description: RwSignal<String>,
    pub comment: RwSignal<String>,
    pub discount_kind: RwSignal<String>,
    pub discount_value: RwSignal<String>,
    pub starts_on: RwSignal<String>,
    pub ends_on: RwSignal<String>,
    pub is_active: RwSignal<bool>,
    pub scope: RwSignal<PricingScope>,

    pub active_tab: RwSignal<&'static str>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl PromotionDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            code: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            discount_kind: RwSignal::new(AdjustmentKind::Percent.as_str().to_string()),
            discount_value: RwSignal::new("0".to_string()),
            starts_on: RwSignal::new(String::new()),
            ends_on: RwSignal::new(String::new()),
            is_active: RwSignal::new(true),
            scope: RwSignal::new(PricingScope::default()),
            active_tab: RwSignal::new("general"),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn is_save_disabled(&self) -> Signal<bool> {
        let (saving, code, description) = (self.saving, self.code, self.description);
        Signal::derive(move || {
            saving.get() || code.get().trim().is_empty() || description.get().trim().is_empty()
        })
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        this.id.set(Some(id.clone()));
        leptos::task::spawn_local(async move {
            match fetch_by_id::<Promotion>(Promotion::collection_name(), &id).await {
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
            match upsert(Promotion::collection_name(), &dto).await {
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

    fn from_aggregate(&self, p: &Promotion) {
        self.code.set(p.promo_code().to_string());
        self.description.set(p.base.description.clone());
        self.comment.set(p.base.comment.clone().unwrap_or_default());
        self.discount_kind.set(p.discount.kind.as_str().to_string());
        self.discount_value.set(format_number(p.discount.value));
        self.starts_on.set(format_date(p.starts_on));
        self.ends_on.set(format_date(p.ends_on));
        self.is_active.set(p.is_active);
        self.scope.set(p.scope.clone());
    }

    fn to_dto(&self) -> Result<PromotionDto, String> {
        let code = normalize_promo_code(&self.code.get_untracked());
        if code.is_empty() {
            return Err("Promo code is required".into());
        }
        if code.chars().any(char::is_whitespace) {
            return Err("Promo code cannot contain spaces".into());
        }
        let description = self.description.get_untracked().trim().to_string();
        if description.is_empty() {
            return Err("Promotion name is required".into());
        }
        let discount = PriceAdjustment {
            kind: AdjustmentKind::parse(&self.discount_kind.get_untracked()).unwrap_or_default(),
            value: parse_f64("Discount", &self.discount_value.get_untracked())?,
        };
        discount.validate()?;
        if discount.value < 0.0 {
            return Err("A promotion discount cannot raise the price".into());
        }
        let starts_on = parse_date("Starts on", &self.starts_on.get_untracked())?;
        let ends_on = parse_date("Ends on", &self.ends_on.get_untracked())?;
        if let (Some(start), Some(end)) = (starts_on, ends_on) {
            if end < start {
                return Err("Promotion ends before it starts".into());
            }
        }

        Ok(PromotionDto {
            id: self.id.get_untracked(),
            code,
            description,
            comment: opt_string(&self.comment.get_untracked()),
            discount,
            starts_on,
            ends_on,
            is_active: self.is_active.get_untracked(),
            scope: self.scope.get_untracked().normalized(),
        })
    }
}

/// Промокоды хранятся в верхнем регистре
fn normalize_promo_code(value: &str) -> String {
    value.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_promo_code() {
        assert_eq!(normalize_promo_code(" spring24 "), "SPRING24");
        assert_eq!(normalize_promo_code("   "), "");
    }
}
