//! Editing module - the inline editable field primitive.

mod inline_field;

pub use inline_field::{FieldPhase, InlineFieldEditor, SaveRequest};
