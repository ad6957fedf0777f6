//! Form domain layer
//!
//! Type-safe text inputs and the custom entry form used by every selector.

mod custom_entry;
mod field;

pub use custom_entry::{CustomEntryForm, CustomEntryInput, Form};
pub use field::FormField;
