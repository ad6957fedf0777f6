//! Reusable UI components

mod confirm_dialog;

pub use confirm_dialog::render_confirm_dialog;
