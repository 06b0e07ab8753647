pub mod badge;
pub mod form_fields;
pub mod selection;
