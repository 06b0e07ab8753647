//! Tab management module
//!
//! - `page` - обёртка контента вкладки
//! - `registry` - маппинг tab.key → View
//! - `tab_labels` - заголовки вкладок и ключи detail-вкладок

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{
    detail_key, detail_tab_label, detail_title, entity_element_name, parse_detail_key, tab_label_for_key,
    title_for_key,
};
