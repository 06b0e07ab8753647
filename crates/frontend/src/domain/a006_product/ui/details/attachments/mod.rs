mod dialog;
pub mod draft;
mod panel;

pub use panel::{AttachmentLookups, AttachmentPanel};
