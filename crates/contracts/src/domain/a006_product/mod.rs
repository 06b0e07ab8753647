pub mod aggregate;
pub mod attachment;
