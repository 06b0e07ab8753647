use crate::domain::common::validation::{opt, require};
use crate::domain::common::{AggregateId, BaseAggregate};
use crate::shared::pricing::PriceAdjustment;
use crate::shared::scope::PricingScope;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(PromotionId);

/// Промоакция: `base.code` - промокод
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    #[serde(flatten)]
    pub base: BaseAggregate<PromotionId>,

    pub discount: PriceAdjustment,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub scope: PricingScope,
}

fn default_true() -> bool {
    true
}

impl Promotion {
    pub fn new_for_insert(dto: &PromotionDto) -> Self {
        let mut base = BaseAggregate::new(
            PromotionId::new_v4(),
            dto.code.trim().to_uppercase(),
            dto.description.clone(),
        );
        base.comment = opt(dto.comment.clone());

        Self {
            base,
            discount: dto.discount,
            starts_on: dto.starts_on,
            ends_on: dto.ends_on,
            is_active: dto.is_active,
            scope: dto.scope.clone().normalized(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn promo_code(&self) -> &str {
        &self.base.code
    }

    pub fn update(&mut self, dto: &PromotionDto) {
        self.base.code = dto.code.trim().to_uppercase();
        self.base.description = dto.description.clone();
        self.base.comment = opt(dto.comment.clone());
        self.discount = dto.discount;
        self.starts_on = dto.starts_on;
        self.ends_on = dto.ends_on;
        self.is_active = dto.is_active;
        self.scope = dto.scope.clone().normalized();
    }

    pub fn validate(&self) -> Result<(), String> {
        require(&self.base.code, "Promo code is required")?;
        require(&self.base.description, "Promotion name is required")?;
        if let (Some(start), Some(end)) = (self.starts_on, self.ends_on) {
            if end < start {
                return Err("Promotion ends before it starts".into());
            }
        }
        self.discount.validate()?;
        if self.discount.value < 0.0 {
            return Err("A promotion discount cannot raise the price".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }

    pub fn is_running_on(&self, date: NaiveDate) -> bool {
        self.is_active
            && self.starts_on.map(|s| s <= date).unwrap_or(true)
            && self.ends_on.map(|e| date <= e).unwrap_or(true)
    }

    pub fn to_dto(&self) -> PromotionDto {
        PromotionDto {
            id: Some(self.to_string_id()),
            code: self.base.code.clone(),
            description: self.base.description.clone(),
            comment: self.base.comment.clone(),
            discount: self.discount,
            starts_on: self.starts_on,
            ends_on: self.ends_on,
            is_active: self.is_active,
            scope: self.scope.clone(),
        }
    }
}

crate::impl_aggregate_root!(Promotion, PromotionId, "a011", "promotion", "Promotion", "Promotions");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionDto {
    pub id: Option<String>,
    /// Promo code
    #[serde(default)]
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    #[serde(default)]
    pub discount: PriceAdjustment,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub scope: PricingScope,
}

impl Default for PromotionDto {
    fn default() -> Self {
        Self {
            id: None,
            code: String::new(),
            description: String::new(),
            comment: None,
            discount: PriceAdjustment::default(),
            starts_on: None,
            ends_on: None,
            is_active: true,
            scope: PricingScope::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_and_discount_rules() {
        let mut dto = PromotionDto {
            code: " spring24 ".into(),
            description: "Spring sale".into(),
            discount: PriceAdjustment::percent(15.0),
            ..Default::default()
        };
        let promo = Promotion::new_for_insert(&dto);
        assert_eq!(promo.promo_code(), "SPRING24");
        assert!(promo.validate().is_ok());

        dto.discount = PriceAdjustment::fixed(-5.0);
        assert!(Promotion::new_for_insert(&dto).validate().is_err());

        dto.discount = PriceAdjustment::percent(15.0);
        dto.code = String::new();
        assert_eq!(
            Promotion::new_for_insert(&dto).validate(),
            Err("Promo code is required".to_string())
        );
    }

    #[test]
    fn test_running_window() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        let promo = Promotion::new_for_insert(&PromotionDto {
            code: "X".into(),
            description: "X".into(),
            starts_on: Some(d(10)),
            ends_on: Some(d(20)),
            ..Default::default()
        });
        assert!(promo.is_running_on(d(10)));
        assert!(promo.is_running_on(d(20)));
        assert!(!promo.is_running_on(d(21)));
    }
}
