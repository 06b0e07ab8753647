pub mod a001_category;
pub mod a002_attribute;
pub mod a003_specification;
pub mod a004_manufacturer;
pub mod a005_supplier;
pub mod a006_product;
pub mod a007_warehouse;
pub mod a008_servicing_area;
pub mod a009_inventory;
pub mod a010_pricing_policy;
pub mod a011_promotion;
pub mod a012_supplier_pricing;
pub mod a013_pricing_rule;
