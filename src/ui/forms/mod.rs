//! Form rendering module
//!
//! - `field_renderer`: single input rendering
//! - `custom_entry`: the custom entry form and the one-line text editor

mod custom_entry;
mod field_renderer;

pub use custom_entry::{draw_custom_entry_form, draw_text_editor};
