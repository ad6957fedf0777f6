//! Application state and key handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use research_output_fields::catalog::{CatalogData, InMemoryCatalog};
use research_output_fields::config::EditorConfig;
use research_output_fields::events::{ChangeLog, NotificationQueue};
use research_output_fields::state::{
    AdditionalFieldUpdate, CatalogRecord, CatalogSelector, CustomEntryForm, FieldsContext,
    FieldsManager, Form, FormField, StandardFieldId,
};
use std::sync::Arc;

/// A row of the fields list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Standard(StandardFieldId),
    Additional(String),
}

/// What a text edit writes back to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTarget {
    FieldValue(StandardFieldId),
    AdditionalLabel(String),
}

/// Which part of the screen receives key presses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    Fields,
    Catalog(StandardFieldId),
    Search(StandardFieldId),
    CustomForm(StandardFieldId),
    ConfirmRemoveAll {
        field: StandardFieldId,
        prompt: String,
    },
    EditText {
        target: TextTarget,
        buffer: FormField,
    },
}

/// Result of a key press inside the catalog modal
enum ModalOutcome {
    Stay,
    Close,
    Search,
    CustomForm,
    CustomFormUnavailable,
    ConfirmRemoveAll(String),
}

/// Main application struct
pub struct App {
    pub manager: FieldsManager,
    pub notifications: Arc<NotificationQueue>,
    pub changes: Arc<ChangeLog>,
    pub focus: Focus,
    /// Selected row of the fields list
    pub cursor: usize,
    /// Selected row of the catalog modal
    pub modal_cursor: usize,
    pub search_input: FormField,
    /// Local hint shown in the status bar until the next key press
    pub status_message: Option<String>,
    quit: bool,
}

impl App {
    /// Create the app from user configuration
    pub fn new(config: &EditorConfig) -> Result<Self> {
        let data = match config.catalog_path() {
            Some(path) => CatalogData::load(&path)?,
            None => CatalogData::builtin(),
        };
        Ok(Self::with_catalog(data, config.page_size_or_default()))
    }

    pub fn with_catalog(data: CatalogData, page_size: usize) -> Self {
        let notifications = Arc::new(NotificationQueue::new());
        let changes = Arc::new(ChangeLog::new());
        let manager = FieldsManager::new(FieldsContext {
            repositories: Arc::new(
                InMemoryCatalog::new(data.repositories).with_page_size(page_size),
            ),
            metadata_standards: Arc::new(
                InMemoryCatalog::new(data.metadata_standards).with_page_size(page_size),
            ),
            notifier: notifications.clone(),
            changes: changes.clone(),
            page_size,
        });

        Self {
            manager,
            notifications,
            changes,
            focus: Focus::Fields,
            cursor: 0,
            modal_cursor: 0,
            search_input: FormField::text("search", "Search", false),
            status_message: None,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Standard fields followed by additional fields
    pub fn rows(&self) -> Vec<Row> {
        StandardFieldId::ALL
            .iter()
            .map(|id| Row::Standard(*id))
            .chain(
                self.manager
                    .additional_fields()
                    .iter()
                    .map(|f| Row::Additional(f.id.clone())),
            )
            .collect()
    }

    pub fn current_row(&self) -> Option<Row> {
        self.rows().get(self.cursor).cloned()
    }

    /// The custom entry form behind a `Focus::CustomForm`
    pub fn custom_form(&self, field: StandardFieldId) -> Option<&CustomEntryForm> {
        match field {
            StandardFieldId::RepoSelector => Some(&self.manager.repositories().custom_form),
            StandardFieldId::MetadataStandards => {
                Some(&self.manager.metadata_standards().custom_form)
            }
            _ => self.manager.option_list(field).map(|l| &l.custom_form),
        }
    }

    fn custom_form_mut(&mut self, field: StandardFieldId) -> Option<&mut CustomEntryForm> {
        match field {
            StandardFieldId::RepoSelector => {
                Some(&mut self.manager.repositories_mut().custom_form)
            }
            StandardFieldId::MetadataStandards => {
                Some(&mut self.manager.metadata_standards_mut().custom_form)
            }
            _ => self
                .manager
                .option_list_mut(field)
                .map(|l| &mut l.custom_form),
        }
    }

    /// Handle a key press
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Clear any status messages on key press
        self.status_message = None;

        match self.focus.clone() {
            Focus::Fields => self.handle_fields_key(key).await?,
            Focus::Catalog(field) => self.handle_catalog_key(field, key).await,
            Focus::Search(field) => self.handle_search_key(field, key),
            Focus::CustomForm(field) => self.handle_custom_form_key(field, key).await,
            Focus::ConfirmRemoveAll { field, .. } => self.handle_confirm_key(field, key),
            Focus::EditText { target, buffer } => self.handle_edit_text_key(target, buffer, key),
        }
        Ok(())
    }

    async fn handle_fields_key(&mut self, key: KeyEvent) -> Result<()> {
        let row_count = self.rows().len();
        let row = self.current_row();

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < row_count {
                    self.cursor += 1;
                }
            }
            KeyCode::Char(' ') => match row {
                Some(Row::Standard(id)) => self.toggle_standard_field(id),
                Some(Row::Additional(id)) => {
                    let enabled = self
                        .manager
                        .additional_field(&id)
                        .is_some_and(|f| f.enabled);
                    self.manager
                        .update_additional_field(&id, AdditionalFieldUpdate::Enabled(!enabled));
                }
                None => {}
            },
            KeyCode::Enter => {
                if let Some(Row::Standard(id)) = row {
                    self.manager.expand_field(id);
                }
            }
            KeyCode::Char('m') => {
                if let Some(Row::Standard(id)) = row {
                    if !self.manager.cycle_mode(id) {
                        self.status_message = Some(format!("{} has no value modes", id.label()));
                    }
                }
            }
            KeyCode::Char('f') => {
                if let Some(Row::Standard(StandardFieldId::DataFlags)) = row {
                    let next = self.manager.data_flags_mode().next();
                    self.manager.set_data_flags_mode(next);
                }
            }
            KeyCode::Char('o') => {
                if let Some(Row::Standard(id)) = row {
                    if id.is_catalog_selector() {
                        self.open_catalog(id).await;
                    }
                }
            }
            KeyCode::Char('c') => {
                if let Some(Row::Standard(id)) = row {
                    let opened = self
                        .manager
                        .option_list_mut(id)
                        .is_some_and(|list| list.open_custom_form());
                    if opened {
                        self.focus = Focus::CustomForm(id);
                    } else if self.manager.option_list(id).is_some() {
                        self.status_message =
                            Some("Switch to custom or merged mode to add values".to_string());
                    }
                }
            }
            KeyCode::Char('x') => {
                if let Some(Row::Standard(id)) = row {
                    if id.is_catalog_selector() {
                        if self.manager.is_expanded(id) {
                            match id {
                                StandardFieldId::RepoSelector => {
                                    remove_last_selected(self.manager.repositories_mut())
                                }
                                _ => remove_last_selected(self.manager.metadata_standards_mut()),
                            }
                        }
                        return Ok(());
                    }
                    let last = self
                        .manager
                        .option_list(id)
                        .and_then(|list| list.custom().last())
                        .map(|entry| entry.id.clone());
                    if let Some(entry) = last {
                        self.manager.remove_custom_option(id, &entry);
                    }
                }
            }
            KeyCode::Char('e') => match row {
                Some(Row::Standard(
                    id @ (StandardFieldId::Title | StandardFieldId::Description),
                )) => {
                    let value = self.manager.field(id).value.clone();
                    self.focus = Focus::EditText {
                        target: TextTarget::FieldValue(id),
                        buffer: FormField::text_with_value("value", id.label(), value, false),
                    };
                }
                Some(Row::Additional(id)) => {
                    let label = self
                        .manager
                        .additional_field(&id)
                        .map(|f| f.label.clone())
                        .unwrap_or_default();
                    self.focus = Focus::EditText {
                        target: TextTarget::AdditionalLabel(id),
                        buffer: FormField::text_with_value("label", "Label", label, false),
                    };
                }
                _ => {}
            },
            KeyCode::Char('a') => {
                let id = self.manager.add_additional_field();
                self.cursor = self.rows().len() - 1;
                self.focus = Focus::EditText {
                    target: TextTarget::AdditionalLabel(id),
                    buffer: FormField::text("label", "Label", false),
                };
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(Row::Additional(id)) = row {
                    self.manager.delete_additional_field(&id);
                    self.cursor = self.cursor.min(self.rows().len() - 1);
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.quit = true;
            }
            _ => {}
        }
        Ok(())
    }

    fn toggle_standard_field(&mut self, id: StandardFieldId) {
        if let Some(reason) = self.manager.locked_reason(id) {
            self.status_message = Some(format!("{}: {}", id.label(), reason));
            return;
        }
        let enabled = self.manager.is_enabled(id);
        self.manager.set_field_enabled(id, !enabled);
    }

    async fn open_catalog(&mut self, field: StandardFieldId) {
        self.modal_cursor = 0;
        self.search_input.clear();
        match field {
            StandardFieldId::RepoSelector => open_selector(self.manager.repositories_mut()).await,
            _ => open_selector(self.manager.metadata_standards_mut()).await,
        }
        self.focus = Focus::Catalog(field);
    }

    async fn handle_catalog_key(&mut self, field: StandardFieldId, key: KeyEvent) {
        let outcome = match field {
            StandardFieldId::RepoSelector => {
                catalog_modal_key(self.manager.repositories_mut(), &mut self.modal_cursor, key)
                    .await
            }
            _ => {
                catalog_modal_key(
                    self.manager.metadata_standards_mut(),
                    &mut self.modal_cursor,
                    key,
                )
                .await
            }
        };

        match outcome {
            ModalOutcome::Stay => {}
            ModalOutcome::Close => self.focus = Focus::Fields,
            ModalOutcome::Search => self.focus = Focus::Search(field),
            ModalOutcome::CustomForm => self.focus = Focus::CustomForm(field),
            ModalOutcome::CustomFormUnavailable => {
                self.status_message =
                    Some("Switch to custom or merged mode to add entries".to_string());
            }
            ModalOutcome::ConfirmRemoveAll(prompt) => {
                self.focus = Focus::ConfirmRemoveAll { field, prompt };
            }
        }
    }

    fn apply_search(&mut self, field: StandardFieldId) {
        let term = self.search_input.as_text().to_string();
        self.modal_cursor = 0;
        match field {
            StandardFieldId::RepoSelector => self.manager.repositories_mut().search(&term),
            _ => self.manager.metadata_standards_mut().search(&term),
        }
    }

    fn handle_search_key(&mut self, field: StandardFieldId, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                self.search_input.push_char(c);
                self.apply_search(field);
            }
            KeyCode::Backspace => {
                self.search_input.pop_char();
                self.apply_search(field);
            }
            KeyCode::Enter => self.focus = Focus::Catalog(field),
            KeyCode::Esc => {
                self.search_input.clear();
                self.apply_search(field);
                self.focus = Focus::Catalog(field);
            }
            _ => {}
        }
    }

    async fn handle_custom_form_key(&mut self, field: StandardFieldId, key: KeyEvent) {
        let return_focus = if field.is_catalog_selector() {
            Focus::Catalog(field)
        } else {
            Focus::Fields
        };

        let submit = matches!(key.code, KeyCode::Enter)
            || (key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL));
        if submit {
            let result = match field {
                StandardFieldId::RepoSelector => {
                    self.manager.repositories_mut().submit_custom().await
                }
                StandardFieldId::MetadataStandards => {
                    self.manager.metadata_standards_mut().submit_custom().await
                }
                _ => self.manager.submit_custom_option(field),
            };
            match result {
                Ok(_) => self.focus = return_focus,
                Err(e) => tracing::debug!(field = ?field, "Custom entry rejected: {e}"),
            }
            return;
        }

        if key.code == KeyCode::Esc {
            match field {
                StandardFieldId::RepoSelector => {
                    self.manager.repositories_mut().cancel_custom_form()
                }
                StandardFieldId::MetadataStandards => {
                    self.manager.metadata_standards_mut().cancel_custom_form()
                }
                _ => {
                    if let Some(list) = self.manager.option_list_mut(field) {
                        list.cancel_custom_form();
                    }
                }
            }
            self.focus = return_focus;
            return;
        }

        let Some(form) = self.custom_form_mut(field) else {
            self.focus = return_focus;
            return;
        };
        match key.code {
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Char(c) => form.get_active_field_mut().push_char(c),
            KeyCode::Backspace => form.get_active_field_mut().pop_char(),
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, field: StandardFieldId, key: KeyEvent) {
        let accepted = match key.code {
            KeyCode::Char('y') | KeyCode::Enter => true,
            KeyCode::Char('n') | KeyCode::Esc => false,
            _ => return,
        };
        let removed = match field {
            StandardFieldId::RepoSelector => {
                self.manager.repositories_mut().remove_all(|_| accepted)
            }
            _ => self.manager.metadata_standards_mut().remove_all(|_| accepted),
        };
        tracing::debug!(field = ?field, removed, "Remove all answered");
        self.focus = Focus::Catalog(field);
    }

    fn handle_edit_text_key(&mut self, target: TextTarget, mut buffer: FormField, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => buffer.push_char(c),
            KeyCode::Backspace => buffer.pop_char(),
            KeyCode::Enter => {
                let value = buffer.trimmed().to_string();
                match target {
                    TextTarget::FieldValue(id) => self.manager.set_field_value(id, value),
                    TextTarget::AdditionalLabel(id) => {
                        self.manager
                            .update_additional_field(&id, AdditionalFieldUpdate::Label(value));
                    }
                }
                self.focus = Focus::Fields;
                return;
            }
            KeyCode::Esc => {
                self.focus = Focus::Fields;
                return;
            }
            _ => {}
        }
        self.focus = Focus::EditText { target, buffer };
    }
}

async fn open_selector<R: CatalogRecord>(selector: &mut CatalogSelector<R>) {
    selector.open();
    selector.search("");
    selector.paginate(1).await;
}

fn remove_last_selected<R: CatalogRecord>(selector: &mut CatalogSelector<R>) {
    let last = selector.selection().as_slice().last().map(|r| r.id().clone());
    if let Some(id) = last {
        selector.remove_one(&id);
    }
}

async fn catalog_modal_key<R: CatalogRecord>(
    selector: &mut CatalogSelector<R>,
    cursor: &mut usize,
    key: KeyEvent,
) -> ModalOutcome {
    let visible = selector.visible_items().len();

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            *cursor = cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if *cursor + 1 < visible {
                *cursor += 1;
            }
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            selector.toggle_visible(*cursor);
        }
        KeyCode::Char('i') => {
            let id = selector
                .visible_items()
                .get(*cursor)
                .map(|r| r.id().clone());
            if let Some(id) = id {
                selector.toggle_details(&id);
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if selector.next_page().await {
                *cursor = 0;
            }
        }
        KeyCode::Left | KeyCode::Char('h') => {
            if selector.prev_page().await {
                *cursor = 0;
            }
        }
        KeyCode::Char('/') => return ModalOutcome::Search,
        KeyCode::Char('c') => {
            return if selector.open_custom_form() {
                ModalOutcome::CustomForm
            } else {
                ModalOutcome::CustomFormUnavailable
            };
        }
        KeyCode::Char('X') => {
            if let Some(prompt) = selector.remove_all_prompt() {
                return ModalOutcome::ConfirmRemoveAll(prompt);
            }
        }
        KeyCode::Esc | KeyCode::Char('q') => {
            selector.close();
            return ModalOutcome::Close;
        }
        _ => {}
    }
    ModalOutcome::Stay
}
