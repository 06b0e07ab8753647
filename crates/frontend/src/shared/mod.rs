pub mod affected_products;
pub mod api_utils;
pub mod components;
pub mod dual_list_selector;
pub mod form_utils;
pub mod icons;
pub mod list_state;
pub mod list_utils;
pub mod lookup;
pub mod modal_frame;
pub mod modal_stack;
pub mod page_frame;
