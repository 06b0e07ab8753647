pub mod db;
pub mod junction;
pub mod scope_store;
