use crate::domain::common::validation::{opt, require};
use crate::domain::common::{AggregateId, BaseAggregate};
use crate::shared::pricing::round_cents;
use crate::shared::scope::PricingScope;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(SupplierPricingId);

/// Закупочные условия поставщика для набора товаров/категорий
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierPricing {
    #[serde(flatten)]
    pub base: BaseAggregate<SupplierPricingId>,

    pub supplier_id: String,
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default)]
    pub min_order_qty: i32,
    #[serde(default)]
    pub lead_time_days: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub scope: PricingScope,
}

fn default_true() -> bool {
    true
}

impl SupplierPricing {
    pub fn new_for_insert(dto: &SupplierPricingDto) -> Self {
        let code = dto
            .code
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| format!("SP-{}", &SupplierPricingId::new_v4().as_string()[..8]));
        let mut base =
            BaseAggregate::new(SupplierPricingId::new_v4(), code, dto.description.clone());
        base.comment = opt(dto.comment.clone());

        Self {
            base,
            supplier_id: dto.supplier_id.trim().to_string(),
            discount_percent: dto.discount_percent,
            min_order_qty: dto.min_order_qty,
            lead_time_days: dto.lead_time_days,
            is_active: dto.is_active,
            scope: dto.scope.clone().normalized(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &SupplierPricingDto) {
        if let Some(code) = dto.code.clone().filter(|c| !c.trim().is_empty()) {
            self.base.code = code;
        }
        self.base.description = dto.description.clone();
        self.base.comment = opt(dto.comment.clone());
        self.supplier_id = dto.supplier_id.trim().to_string();
        self.discount_percent = dto.discount_percent;
        self.min_order_qty = dto.min_order_qty;
        self.lead_time_days = dto.lead_time_days;
        self.is_active = dto.is_active;
        self.scope = dto.scope.clone().normalized();
    }

    pub fn validate(&self) -> Result<(), String> {
        require(&self.supplier_id, "Supplier is required")?;
        if !self.discount_percent.is_finite()
            || self.discount_percent < 0.0
            || self.discount_percent > 100.0
        {
            return Err("Discount must be between 0 and 100 percent".into());
        }
        if self.min_order_qty < 0 {
            return Err("Minimum order quantity cannot be negative".into());
        }
        if self.lead_time_days < 0 {
            return Err("Lead time cannot be negative".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }

    /// Закупочная цена с учётом скидки поставщика
    pub fn net_cost(&self, cost_price: f64) -> f64 {
        round_cents((cost_price * (1.0 - self.discount_percent / 100.0)).max(0.0))
    }

    pub fn to_dto(&self) -> SupplierPricingDto {
        SupplierPricingDto {
            id: Some(self.to_string_id()),
            code: Some(self.base.code.clone()),
            description: self.base.description.clone(),
            comment: self.base.comment.clone(),
            supplier_id: self.supplier_id.clone(),
            discount_percent: self.discount_percent,
            min_order_qty: self.min_order_qty,
            lead_time_days: self.lead_time_days,
            is_active: self.is_active,
            scope: self.scope.clone(),
        }
    }
}

crate::impl_aggregate_root!(
    SupplierPricing,
    SupplierPricingId,
    "a012",
    "supplier_pricing",
    "Supplier pricing",
    "Supplier pricing"
);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierPricingDto {
    pub id: Option<String>,
    pub code: Option<String>,
    #[serde(default)]
    pub description: String,
    pub comment: Option<String>,
    #[serde(default)]
    pub supplier_id: String,
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default)]
    pub min_order_qty: i32,
    #[serde(default)]
    pub lead_time_days: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub scope: PricingScope,
}

impl Default for SupplierPricingDto {
    fn default() -> Self {
        Self {
            id: None,
            code: None,
            description: String::new(),
            comment: None,
            supplier_id: String::new(),
            discount_percent: 0.0,
            min_order_qty: 0,
            lead_time_days: 0,
            is_active: true,
            scope: PricingScope::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(discount: f64) -> SupplierPricingDto {
        SupplierPricingDto {
            description: "Bosch terms".into(),
            supplier_id: "sup-1".into(),
            discount_percent: discount,
            min_order_qty: 10,
            lead_time_days: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_discount_bounds() {
        assert!(SupplierPricing::new_for_insert(&dto(0.0)).validate().is_ok());
        assert!(SupplierPricing::new_for_insert(&dto(100.0)).validate().is_ok());
        assert!(SupplierPricing::new_for_insert(&dto(-0.1)).validate().is_err());
        assert!(SupplierPricing::new_for_insert(&dto(100.1)).validate().is_err());

        let mut d = dto(5.0);
        d.supplier_id = " ".into();
        assert!(SupplierPricing::new_for_insert(&d).validate().is_err());
    }

    #[test]
    fn test_net_cost() {
        let sp = SupplierPricing::new_for_insert(&dto(12.5));
        assert_eq!(sp.net_cost(80.0), 70.0);
    }
}
