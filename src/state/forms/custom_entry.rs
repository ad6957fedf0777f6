//! Custom entry form shared by every selector and option list

use super::field::FormField;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> &mut FormField;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Validated, trimmed custom entry values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEntryInput {
    pub name: String,
    pub url: String,
    pub description: String,
}

/// Form for authoring a record that is not in the catalog
#[derive(Debug, Clone)]
pub struct CustomEntryForm {
    pub name: FormField,
    pub url: FormField,
    pub description: FormField,
    pub active_field_index: usize,
    open: bool,
    submitting: bool,
    /// Local failure indication from the last submit
    pub error: Option<String>,
}

impl CustomEntryForm {
    pub fn new() -> Self {
        Self {
            name: FormField::text("name", "Name", false),
            url: FormField::text("url", "URL", false),
            description: FormField::text("description", "Description", true),
            active_field_index: 0,
            open: false,
            submitting: false,
            error: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Discard everything entered and close
    pub fn cancel(&mut self) {
        self.clear();
        self.open = false;
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        self.open && !self.submitting
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    /// Check required fields and produce trimmed values.
    ///
    /// On failure the entered values are left untouched and `error` is set.
    pub fn validate(&mut self) -> Result<CustomEntryInput, ValidationError> {
        let missing: Vec<&'static str> = [
            ("name", &self.name),
            ("url", &self.url),
            ("description", &self.description),
        ]
        .into_iter()
        .filter(|(_, field)| field.is_blank())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            let err = ValidationError { missing };
            self.error = Some(err.to_string());
            return Err(err);
        }

        self.error = None;
        Ok(CustomEntryInput {
            name: self.name.trimmed().to_string(),
            url: self.url.trimmed().to_string(),
            description: self.description.trimmed().to_string(),
        })
    }

    /// Clear values and close after a successful submit
    pub fn complete(&mut self) {
        self.clear();
        self.submitting = false;
        self.open = false;
    }

    fn clear(&mut self) {
        self.name.clear();
        self.url.clear();
        self.description.clear();
        self.active_field_index = 0;
        self.error = None;
    }
}

impl Default for CustomEntryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for CustomEntryForm {
    fn field_count(&self) -> usize {
        3
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(2);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.name,
            1 => &mut self.url,
            _ => &mut self.description,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.name),
            1 => Some(&self.url),
            2 => Some(&self.description),
            _ => None,
        }
    }
}
