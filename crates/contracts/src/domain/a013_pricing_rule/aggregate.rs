use crate::domain::common::validation::{opt, require};
use crate::domain::common::{AggregateId, BaseAggregate};
use crate::shared::pricing::{compute_rule_price, PriceBase, Rounding};
use crate::shared::scope::PricingScope;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(PricingRuleId);

/// Правило расчёта цены: цена = база * (1 + наценка%), затем округление
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRule {
    #[serde(flatten)]
    pub base: BaseAggregate<PricingRuleId>,

    pub price_base: PriceBase,
    pub markup_percent: f64,
    #[serde(default)]
    pub rounding: Rounding,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub scope: PricingScope,
}

fn default_true() -> bool {
    true
}

impl PricingRule {
    pub fn new_for_insert(dto: &PricingRuleDto) -> Self {
        let code = dto
            .code
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| format!("PR-{}", &PricingRuleId::new_v4().as_string()[..8]));
        let mut base = BaseAggregate::new(PricingRuleId::new_v4(), code, dto.description.clone());
        base.comment = opt(dto.comment.clone());

        Self {
            base,
            price_base: dto.price_base,
            markup_percent: dto.markup_percent,
            rounding: dto.rounding,
            priority: dto.priority,
            is_active: dto.is_active,
            scope: dto.scope.clone().normalized(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &PricingRuleDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = opt(dto.comment.clone());
        self.price_base = dto.price_base;
        self.markup_percent = dto.markup_percent;
        self.rounding = dto.rounding;
        self.priority = dto.priority;
        self.is_active = dto.is_active;
        self.scope = dto.scope.clone().normalized();
    }

    pub fn validate(&self) -> Result<(), String> {
        require(&self.base.description, "Rule name is required")?;
        if !self.markup_percent.is_finite() || self.markup_percent <= -100.0 {
            return Err("Markup must be greater than -100 percent".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }

    /// Цена товара по правилу
    pub fn price_for(&self, cost_price: f64, list_price: f64) -> f64 {
        let base = match self.price_base {
            PriceBase::Cost => cost_price,
            PriceBase::List => list_price,
        };
        compute_rule_price(base, self.markup_percent, self.rounding)
    }

    pub fn to_dto(&self) -> PricingRuleDto {
        PricingRuleDto {
            id: Some(self.to_string_id()),
            code: Some(self.base.code.clone()),
            description: self.base.description.clone(),
            comment: self.base.comment.clone(),
            price_base: self.price_base,
            markup_percent: self.markup_percent,
            rounding: self.rounding,
            priority: self.priority,
            is_active: self.is_active,
            scope: self.scope.clone(),
        }
    }
}

crate::impl_aggregate_root!(
    PricingRule,
    PricingRuleId,
    "a013",
    "pricing_rule",
    "Pricing rule",
    "Pricing rules"
);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRuleDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    #[serde(default)]
    pub price_base: PriceBase,
    #[serde(default)]
    pub markup_percent: f64,
    #[serde(default)]
    pub rounding: Rounding,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub scope: PricingScope,
}

impl Default for PricingRuleDto {
    fn default() -> Self {
        Self {
            id: None,
            code: None,
            description: String::new(),
            comment: None,
            price_base: PriceBase::Cost,
            markup_percent: 0.0,
            rounding: Rounding::None,
            priority: 0,
            is_active: true,
            scope: PricingScope::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(price_base: PriceBase, markup: f64) -> PricingRule {
        PricingRule::new_for_insert(&PricingRuleDto {
            description: "Tools markup".into(),
            price_base,
            markup_percent: markup,
            rounding: Rounding::Ending99,
            ..Default::default()
        })
    }

    #[test]
    fn test_markup_bound() {
        assert!(rule(PriceBase::Cost, -99.0).validate().is_ok());
        assert!(rule(PriceBase::Cost, -100.0).validate().is_err());
        assert!(rule(PriceBase::Cost, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_price_for_uses_base() {
        assert_eq!(rule(PriceBase::Cost, 25.0).price_for(80.0, 200.0), 100.99);
        assert_eq!(rule(PriceBase::List, 0.0).price_for(80.0, 200.0), 200.99);
    }
}
