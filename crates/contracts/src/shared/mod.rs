pub mod hierarchy;
pub mod logger;
pub mod pricing;
pub mod scope;
