//! Mode engine for the output-type and license fields

use super::{
    CustomEntryForm, ModeView, OptionEntry, RecordId, RecordKind, StandardFieldId, ValueMode,
};
use crate::error::{FieldsError, FieldsResult};
use crate::events::{Notification, NotificationSink};
use std::sync::Arc;

/// Built-in values plus an author-maintained list of custom values
pub struct OptionList {
    field: StandardFieldId,
    kind: RecordKind,
    mode: ValueMode,
    defaults: Vec<OptionEntry>,
    custom: Vec<OptionEntry>,
    pub custom_form: CustomEntryForm,
    notifier: Arc<dyn NotificationSink>,
}

impl OptionList {
    pub fn new(
        field: StandardFieldId,
        kind: RecordKind,
        defaults: Vec<OptionEntry>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            field,
            kind,
            mode: ValueMode::default(),
            defaults,
            custom: Vec::new(),
            custom_form: CustomEntryForm::new(),
            notifier,
        }
    }

    pub fn with_custom(mut self, custom: Vec<OptionEntry>) -> Self {
        self.custom = custom;
        self
    }

    pub fn field(&self) -> StandardFieldId {
        self.field
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn mode(&self) -> ValueMode {
        self.mode
    }

    /// Switch modes without discarding the custom list
    pub fn set_mode(&mut self, mode: ValueMode) -> bool {
        if self.mode == mode {
            return false;
        }
        tracing::debug!(field = ?self.field, from = ?self.mode, to = ?mode, "Option list mode changed");
        self.mode = mode;
        if !mode.exposes_custom() {
            self.custom_form.cancel();
        }
        true
    }

    pub fn mode_view(&self) -> ModeView<'_, OptionEntry> {
        ModeView::new(self.mode, &self.defaults, &self.custom)
    }

    pub fn defaults(&self) -> &[OptionEntry] {
        &self.defaults
    }

    /// The stored custom list, regardless of mode
    pub fn custom(&self) -> &[OptionEntry] {
        &self.custom
    }

    pub fn open_custom_form(&mut self) -> bool {
        if !self.mode.exposes_custom() {
            return false;
        }
        self.custom_form.open();
        true
    }

    pub fn cancel_custom_form(&mut self) {
        self.custom_form.cancel();
    }

    /// Validate the form and append the new value to the custom list
    pub fn submit_custom(&mut self) -> FieldsResult<RecordId> {
        if !self.mode.exposes_custom() || !self.custom_form.can_submit() {
            return Err(FieldsError::FormNotOpen(self.field));
        }
        let input = match self.custom_form.validate() {
            Ok(input) => input,
            Err(e) => {
                self.notifier.notify(Notification::error(format!(
                    "Could not add custom {}: {}",
                    self.kind, e
                )));
                return Err(e.into());
            }
        };
        let entry = OptionEntry::from_custom(RecordId::new_custom(), &input);
        let id = entry.id.clone();
        tracing::info!(field = ?self.field, %id, "Added custom {}", self.kind);
        self.notifier
            .notify(Notification::success(format!("{} added", entry.name)));
        self.custom.push(entry);
        self.custom_form.complete();
        Ok(id)
    }

    pub fn remove_custom(&mut self, id: &RecordId) -> bool {
        let Some(index) = self.custom.iter().position(|e| &e.id == id) else {
            tracing::debug!(field = ?self.field, %id, "remove_custom: unknown id");
            return false;
        };
        let entry = self.custom.remove(index);
        self.notifier
            .notify(Notification::success(format!("{} removed", entry.name)));
        true
    }
}
