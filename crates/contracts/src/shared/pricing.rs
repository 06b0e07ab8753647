//! Ценовая арифметика: политики, акции и правила расчёта

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    #[default]
    Percent,
    Fixed,
}

impl AdjustmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentKind::Percent => "percent",
            AdjustmentKind::Fixed => "fixed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "percent" => Some(AdjustmentKind::Percent),
            "fixed" => Some(AdjustmentKind::Fixed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdjustmentKind::Percent => "Percent off",
            AdjustmentKind::Fixed => "Fixed amount off",
        }
    }
}

/// Скидка/наценка: процент или фиксированная сумма
///
/// Положительное значение уменьшает цену, отрицательное - увеличивает.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PriceAdjustment {
    pub kind: AdjustmentKind,
    pub value: f64,
}

impl PriceAdjustment {
    pub fn percent(value: f64) -> Self {
        Self {
            kind: AdjustmentKind::Percent,
            value,
        }
    }

    pub fn fixed(value: f64) -> Self {
        Self {
            kind: AdjustmentKind::Fixed,
            value,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.value.is_finite() {
            return Err("Adjustment value must be a number".into());
        }
        if self.kind == AdjustmentKind::Percent && self.value > 100.0 {
            return Err("Percent adjustment cannot exceed 100".into());
        }
        Ok(())
    }

    /// Применить к цене; результат не бывает меньше нуля
    pub fn apply(&self, price: f64) -> f64 {
        let adjusted = match self.kind {
            AdjustmentKind::Percent => price * (1.0 - self.value / 100.0),
            AdjustmentKind::Fixed => price - self.value,
        };
        round_cents(adjusted.max(0.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriceBase {
    #[default]
    Cost,
    List,
}

impl PriceBase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBase::Cost => "cost",
            PriceBase::List => "list",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cost" => Some(PriceBase::Cost),
            "list" => Some(PriceBase::List),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// До копеек
    #[default]
    None,
    /// До целых
    Whole,
    /// Ближайшее x.99 не ниже цены
    Ending99,
}

impl Rounding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rounding::None => "none",
            Rounding::Whole => "whole",
            Rounding::Ending99 => "ending99",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Rounding::None),
            "whole" => Some(Rounding::Whole),
            "ending99" => Some(Rounding::Ending99),
            _ => None,
        }
    }

    pub fn apply(&self, price: f64) -> f64 {
        let cents = round_cents(price);
        match self {
            Rounding::None => cents,
            Rounding::Whole => cents.round(),
            Rounding::Ending99 => {
                let candidate = cents.floor() + 0.99;
                let result = if candidate + 1e-9 >= cents {
                    candidate
                } else {
                    candidate + 1.0
                };
                round_cents(result)
            }
        }
    }
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Цена по правилу расчёта: база + наценка, затем округление
pub fn compute_rule_price(base_price: f64, markup_percent: f64, rounding: Rounding) -> f64 {
    let raw = base_price * (1.0 + markup_percent / 100.0);
    rounding.apply(raw.max(0.0))
}

/// Товар, попавший в область действия ценовой конструкции
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedProduct {
    pub product_id: String,
    pub sku: String,
    pub name: String,
    pub category_id: Option<String>,
    pub list_price: f64,
    pub cost_price: f64,
    /// Цена после применения (для правил расчёта и политик)
    pub price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjustment_apply() {
        assert_eq!(PriceAdjustment::percent(10.0).apply(200.0), 180.0);
        assert_eq!(PriceAdjustment::fixed(15.5).apply(100.0), 84.5);
        assert_eq!(PriceAdjustment::fixed(150.0).apply(100.0), 0.0);
        assert_eq!(PriceAdjustment::percent(-5.0).apply(100.0), 105.0);
    }

    #[test]
    fn test_adjustment_validate() {
        assert!(PriceAdjustment::percent(100.0).validate().is_ok());
        assert!(PriceAdjustment::percent(100.5).validate().is_err());
        assert!(PriceAdjustment::fixed(f64::NAN).validate().is_err());
        assert!(PriceAdjustment::fixed(500.0).validate().is_ok());
    }

    #[test]
    fn test_rounding() {
        assert_eq!(Rounding::None.apply(12.346), 12.35);
        assert_eq!(Rounding::Whole.apply(12.5), 13.0);
        assert_eq!(Rounding::Whole.apply(12.49), 12.0);
        assert_eq!(Rounding::Ending99.apply(12.10), 12.99);
        assert_eq!(Rounding::Ending99.apply(12.99), 12.99);
        assert_eq!(Rounding::Ending99.apply(13.0), 13.99);
    }

    #[test]
    fn test_compute_rule_price() {
        assert_eq!(compute_rule_price(80.0, 25.0, Rounding::None), 100.0);
        assert_eq!(compute_rule_price(80.0, 25.0, Rounding::Ending99), 100.99);
        assert_eq!(compute_rule_price(10.0, 33.0, Rounding::Whole), 13.0);
        assert_eq!(compute_rule_price(10.0, -200.0, Rounding::None), 0.0);
    }

    #[test]
    fn test_enum_strings() {
        assert_eq!(Rounding::parse(Rounding::Ending99.as_str()), Some(Rounding::Ending99));
        assert_eq!(PriceBase::parse("list"), Some(PriceBase::List));
        assert_eq!(AdjustmentKind::parse("fixed"), Some(AdjustmentKind::Fixed));
    }
}
