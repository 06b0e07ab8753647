use contracts::shared::pricing::{PriceBase, Rounding};

pub const PRICE_BASES: [PriceBase; 2] = [PriceBase::Cost, PriceBase::List];
pub const ROUNDINGS: [Rounding; 3] = [Rounding::None, Rounding::Whole, Rounding::Ending99];

pub fn price_base_label(base: PriceBase) -> &'static str {
    match base {
        PriceBase::Cost => "Cost price",
        PriceBase::List => "List price",
    }
}

pub fn rounding_label(rounding: Rounding) -> &'static str {
    match rounding {
        Rounding::None => "To cents",
        Rounding::Whole => "Whole units",
        Rounding::Ending99 => "Ending .99",
    }
}

/// «Cost price +25%»
pub fn formula_text(base: PriceBase, markup_percent: f64) -> String {
    format!("{} {:+}%", price_base_label(base), markup_percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_text() {
        assert_eq!(formula_text(PriceBase::Cost, 25.0), "Cost price +25%");
        assert_eq!(formula_text(PriceBase::List, -10.5), "List price -10.5%");
    }
}
