//! Системные экраны

pub mod logs;
