use crate::domain::common::validation::{opt, require};
use crate::domain::common::{AggregateId, BaseAggregate};
use crate::shared::pricing::PriceAdjustment;
use crate::shared::scope::PricingScope;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================
crate::aggregate_id!(PricingPolicyId);

// ============================================================================
// Aggregate Root
// ============================================================================

/// Ценовая политика: корректировка цены для набора товаров/категорий
/// на период действия
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingPolicy {
    #[serde(flatten)]
    pub base: BaseAggregate<PricingPolicyId>,

    pub adjustment: PriceAdjustment,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    /// Хранится в `pricing_scope_item`, не в строке политики
    #[serde(default)]
    pub scope: PricingScope,
}

fn default_true() -> bool {
    true
}

impl PricingPolicy {
    pub fn new_for_insert(dto: &PricingPolicyDto) -> Self {
        let code = dto
            .code
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| format!("PP-{}", &PricingPolicyId::new_v4().as_string()[..8]));
        let mut base = BaseAggregate::new(PricingPolicyId::new_v4(), code, dto.description.clone());
        base.comment = opt(dto.comment.clone());

        Self {
            base,
            adjustment: dto.adjustment,
            priority: dto.priority,
            is_active: dto.is_active,
            valid_from: dto.valid_from,
            valid_to: dto.valid_to,
            scope: dto.scope.clone().normalized(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &PricingPolicyDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = opt(dto.comment.clone());
        self.adjustment = dto.adjustment;
        self.priority = dto.priority;
        self.is_active = dto.is_active;
        self.valid_from = dto.valid_from;
        self.valid_to = dto.valid_to;
        self.scope = dto.scope.clone().normalized();
    }

    pub fn validate(&self) -> Result<(), String> {
        require(&self.base.description, "Policy name is required")?;
        if let (Some(from), Some(to)) = (self.valid_from, self.valid_to) {
            if to < from {
                return Err("Valid-to date is before valid-from date".into());
            }
        }
        self.adjustment.validate()
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }

    /// Действует ли политика на дату
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.is_active
            && self.valid_from.map(|f| f <= date).unwrap_or(true)
            && self.valid_to.map(|t| date <= t).unwrap_or(true)
    }

    pub fn to_dto(&self) -> PricingPolicyDto {
        PricingPolicyDto {
            id: Some(self.to_string_id()),
            code: Some(self.base.code.clone()),
            description: self.base.description.clone(),
            comment: self.base.comment.clone(),
            adjustment: self.adjustment,
            priority: self.priority,
            is_active: self.is_active,
            valid_from: self.valid_from,
            valid_to: self.valid_to,
            scope: self.scope.clone(),
        }
    }
}

crate::impl_aggregate_root!(
    PricingPolicy,
    PricingPolicyId,
    "a010",
    "pricing_policy",
    "Pricing policy",
    "Pricing policies"
);

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingPolicyDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    #[serde(default)]
    pub adjustment: PriceAdjustment,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    #[serde(default)]
    pub scope: PricingScope,
}

impl Default for PricingPolicyDto {
    fn default() -> Self {
        Self {
            id: None,
            code: None,
            description: String::new(),
            comment: None,
            adjustment: PriceAdjustment::default(),
            priority: 0,
            is_active: true,
            valid_from: None,
            valid_to: None,
            scope: PricingScope::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::scope::ScopeItemKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_validation() {
        let mut dto = PricingPolicyDto {
            description: "Summer".into(),
            adjustment: PriceAdjustment::percent(10.0),
            valid_from: Some(date(2024, 6, 1)),
            valid_to: Some(date(2024, 5, 1)),
            ..Default::default()
        };
        assert!(PricingPolicy::new_for_insert(&dto).validate().is_err());
        dto.valid_to = Some(date(2024, 8, 31));
        let p = PricingPolicy::new_for_insert(&dto);
        assert!(p.validate().is_ok());
        assert!(p.is_effective_on(date(2024, 7, 1)));
        assert!(!p.is_effective_on(date(2024, 9, 1)));
    }

    #[test]
    fn test_scope_normalized_on_insert() {
        let mut scope = PricingScope::default();
        scope.included_products = vec!["p2".into(), "p1".into(), "p1".into()];
        scope.excluded_products = vec!["p2".into()];
        let p = PricingPolicy::new_for_insert(&PricingPolicyDto {
            description: "X".into(),
            scope,
            ..Default::default()
        });
        assert_eq!(p.scope.included_products, vec!["p1"]);
        assert_eq!(p.scope.excluded_products, vec!["p2"]);
        assert!(p.scope.has_inclusions());
        assert_eq!(
            p.scope.state_of(ScopeItemKind::Product, "p2"),
            crate::shared::scope::ScopeState::Excluded
        );
    }
}
