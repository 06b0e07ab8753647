use crate::shared::api_utils::{fetch_by_id, upsert};
use crate::shared::form_utils::{format_money, format_number, opt_string, parse_f64, parse_i32};
use contracts::domain::a013_pricing_rule::aggregate::{PricingRule, PricingRuleDto};
use contracts::domain::common::AggregateRoot;
use contracts::shared::pricing::{compute_rule_price, PriceBase, Rounding};
use contracts::shared::scope::PricingScope;
use leptos::prelude::*;

/// Базовая цена для примера расчёта в карточке
const SAMPLE_BASE_PRICE: f64 = 100.0;

#[derive(Clone, Copy)]
pub struct PricingRuleDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub code: RwSignal<String>,
    pub description: RwSignal<String>,
    pub comment: RwSignal<String>,
    pub price_base: RwSignal<String>,
    pub markup_percent: RwSignal<String>,
    pub rounding: RwSignal<String>,
    pub priority: RwSignal<String>,
    pub is_active: RwSignal<bool>,
    pub scope: RwSignal<PricingScope>,

    pub active_tab: RwSignal<&'static str>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl PricingRuleDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            code: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            price_base: RwSignal::new(PriceBase::Cost.as_str().to_string()),
            markup_percent: RwSignal::new("0".to_string()),
            rounding: RwSignal::new(Rounding::None.as_str().to_string()),
            priority: RwSignal::new("0".to_string()),
            is_active: RwSignal::new(true),
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

    /// Пример: во что превратится базовая цена 100
    pub fn example(&self) -> Signal<String> {
        let (markup, rounding) = (self.markup_percent, self.rounding);
        Signal::derive(move || {
            let rounding = Rounding::parse(&rounding.get()).unwrap_or_default();
            match parse_f64("Markup", &markup.get()) {
                Ok(m) if m > -100.0 => example_text(m, rounding),
                _ => String::new(),
            }
        })
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        this.id.set(Some(id.clone()));
        leptos::task::spawn_local(async move {
            match fetch_by_id::<PricingRule>(PricingRule::collection_name(), &id).await {
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
            match upsert(PricingRule::collection_name(), &dto).await {
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

    fn from_aggregate(&self, r: &PricingRule) {
        self.code.set(r.base.code.clone());
        self.description.set(r.base.description.clone());
        self.comment.set(r.base.comment.clone().unwrap_or_default());
        self.price_base.set(r.price_base.as_str().to_string());
        self.markup_percent.set(format_number(r.markup_percent));
        self.rounding.set(r.rounding.as_str().to_string());
        self.priority.set(r.priority.to_string());
        self.is_active.set(r.is_active);
        self.scope.set(r.scope.clone());
    }

    fn to_dto(&self) -> Result<PricingRuleDto, String> {
        let description = self.description.get_untracked().trim().to_string();
        if description.is_empty() {
            return Err("Rule name is required".into());
        }
        let markup_percent = parse_f64("Markup", &self.markup_percent.get_untracked())?;
        if markup_percent <= -100.0 {
            return Err("Markup must be greater than -100 percent".into());
        }

        Ok(PricingRuleDto {
            id: self.id.get_untracked(),
            code: opt_string(&self.code.get_untracked()),
            description,
            comment: opt_string(&self.comment.get_untracked()),
            price_base: PriceBase::parse(&self.price_base.get_untracked()).unwrap_or_default(),
            markup_percent,
            rounding: Rounding::parse(&self.rounding.get_untracked()).unwrap_or_default(),
            priority: parse_i32("Priority", &self.priority.get_untracked())?,
            is_active: self.is_active.get_untracked(),
            scope: self.scope.get_untracked().normalized(),
        })
    }
}

fn example_text(markup_percent: f64, rounding: Rounding) -> String {
    format!(
        "{} -> {}",
        format_money(SAMPLE_BASE_PRICE),
        format_money(compute_rule_price(SAMPLE_BASE_PRICE, markup_percent, rounding))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_text() {
        assert_eq!(example_text(25.0, Rounding::None), "100.00 -> 125.00");
        assert_eq!(example_text(25.0, Rounding::Ending99), "100.00 -> 125.99");
        assert_eq!(example_text(-12.6, Rounding::Whole), "100.00 -> 87.00");
    }
}
