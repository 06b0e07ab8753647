pub mod details;
mod labels;
pub mod list;
