use crate::domain::common::validation::{opt, require};
use crate::domain::common::{AggregateId, BaseAggregate};
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================
crate::aggregate_id!(ProductId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Draft,
    Active,
    Discontinued,
}

impl ProductStatus {
    pub fn all() -> [ProductStatus; 3] {
        [
            ProductStatus::Draft,
            ProductStatus::Active,
            ProductStatus::Discontinued,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "draft",
            ProductStatus::Active => "active",
            ProductStatus::Discontinued => "discontinued",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|st| st.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "Draft",
            ProductStatus::Active => "Active",
            ProductStatus::Discontinued => "Discontinued",
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Товар каталога
///
/// `base.code` хранит артикул (SKU), `base.description` - наименование.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(flatten)]
    pub base: BaseAggregate<ProductId>,

    pub category_id: Option<String>,
    pub manufacturer_id: Option<String>,
    pub supplier_id: Option<String>,
    #[serde(default)]
    pub list_price: f64,
    #[serde(default)]
    pub cost_price: f64,
    #[serde(default)]
    pub status: ProductStatus,
    pub barcode: Option<String>,
    pub weight_kg: Option<f64>,
}

impl Product {
    pub fn new_for_insert(dto: &ProductDto) -> Self {
        let mut base = BaseAggregate::new(
            ProductId::new_v4(),
            dto.code.trim().to_string(),
            dto.description.clone(),
        );
        base.comment = opt(dto.comment.clone());

        Self {
            base,
            category_id: opt(dto.category_id.clone()),
            manufacturer_id: opt(dto.manufacturer_id.clone()),
            supplier_id: opt(dto.supplier_id.clone()),
            list_price: dto.list_price,
            cost_price: dto.cost_price,
            status: dto.status,
            barcode: opt(dto.barcode.clone()),
            weight_kg: dto.weight_kg,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn sku(&self) -> &str {
        &self.base.code
    }

    pub fn update(&mut self, dto: &ProductDto) {
        self.base.code = dto.code.trim().to_string();
        self.base.description = dto.description.clone();
        self.base.comment = opt(dto.comment.clone());
        self.category_id = opt(dto.category_id.clone());
        self.manufacturer_id = opt(dto.manufacturer_id.clone());
        self.supplier_id = opt(dto.supplier_id.clone());
        self.list_price = dto.list_price;
        self.cost_price = dto.cost_price;
        self.status = dto.status;
        self.barcode = opt(dto.barcode.clone());
        self.weight_kg = dto.weight_kg;
    }

    pub fn validate(&self) -> Result<(), String> {
        require(&self.base.code, "SKU is required")?;
        require(&self.base.description, "Product name is required")?;
        if !self.list_price.is_finite() || self.list_price < 0.0 {
            return Err("List price cannot be negative".into());
        }
        if !self.cost_price.is_finite() || self.cost_price < 0.0 {
            return Err("Cost price cannot be negative".into());
        }
        if let Some(w) = self.weight_kg {
            if !w.is_finite() || w < 0.0 {
                return Err("Weight cannot be negative".into());
            }
        }
        if self.status == ProductStatus::Active && self.category_id.is_none() {
            return Err("An active product must belong to a category".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }

    /// Маржа в процентах от цены продажи
    pub fn margin_percent(&self) -> Option<f64> {
        if self.list_price > 0.0 {
            Some((self.list_price - self.cost_price) / self.list_price * 100.0)
        } else {
            None
        }
    }

    pub fn to_dto(&self) -> ProductDto {
        ProductDto {
            id: Some(self.to_string_id()),
            code: self.base.code.clone(),
            description: self.base.description.clone(),
            comment: self.base.comment.clone(),
            category_id: self.category_id.clone(),
            manufacturer_id: self.manufacturer_id.clone(),
            supplier_id: self.supplier_id.clone(),
            list_price: self.list_price,
            cost_price: self.cost_price,
            status: self.status,
            barcode: self.barcode.clone(),
            weight_kg: self.weight_kg,
        }
    }
}

crate::impl_aggregate_root!(Product, ProductId, "a006", "product", "Product", "Products");

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductDto {
    pub id: Option<String>,
    /// SKU
    #[serde(default)]
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub category_id: Option<String>,
    pub manufacturer_id: Option<String>,
    pub supplier_id: Option<String>,
    #[serde(default)]
    pub list_price: f64,
    #[serde(default)]
    pub cost_price: f64,
    #[serde(default)]
    pub status: ProductStatus,
    pub barcode: Option<String>,
    pub weight_kg: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> ProductDto {
        ProductDto {
            code: " DRL-18V ".into(),
            description: "Cordless drill 18V".into(),
            list_price: 120.0,
            cost_price: 90.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_sku_trimmed_and_required() {
        let p = Product::new_for_insert(&dto());
        assert_eq!(p.sku(), "DRL-18V");
        assert!(p.validate().is_ok());

        let mut d = dto();
        d.code = "  ".into();
        assert_eq!(
            Product::new_for_insert(&d).validate(),
            Err("SKU is required".to_string())
        );
    }

    #[test]
    fn test_prices_and_status() {
        let mut d = dto();
        d.cost_price = -1.0;
        assert!(Product::new_for_insert(&d).validate().is_err());

        let mut d = dto();
        d.status = ProductStatus::Active;
        assert!(Product::new_for_insert(&d).validate().is_err());
        d.category_id = Some("cat-1".into());
        assert!(Product::new_for_insert(&d).validate().is_ok());
    }

    #[test]
    fn test_margin() {
        let p = Product::new_for_insert(&dto());
        assert_eq!(p.margin_percent(), Some(25.0));
        let mut d = dto();
        d.list_price = 0.0;
        assert_eq!(Product::new_for_insert(&d).margin_percent(), None);
    }
}
