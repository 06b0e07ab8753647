mod page;
mod view_model;

pub use page::PricingPolicyDetails;
