pub mod details;
pub mod tree;
