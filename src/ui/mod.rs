//! UI module for rendering the TUI

mod catalog;
mod components;
mod fields;
mod forms;
mod layout;
mod widgets;

use crate::app::{App, Focus, TextTarget};
use components::render_confirm_dialog;
use ratatui::Frame;
use research_output_fields::state::StandardFieldId;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (list_area, detail_area, status_area) = layout::create_layout(frame.area());

    fields::draw_list(frame, list_area, app);
    fields::draw_detail(frame, detail_area, app);

    // Overlays
    match &app.focus {
        Focus::Fields => {}
        Focus::Catalog(field) | Focus::Search(field) => draw_catalog(frame, app, *field),
        Focus::ConfirmRemoveAll { field, prompt } => {
            draw_catalog(frame, app, *field);
            render_confirm_dialog(frame, prompt);
        }
        Focus::CustomForm(field) => {
            if field.is_catalog_selector() {
                draw_catalog(frame, app, *field);
            }
            if let Some(form) = app.custom_form(*field) {
                let kind = match field {
                    StandardFieldId::RepoSelector => app.manager.repositories().kind_label(),
                    StandardFieldId::MetadataStandards => {
                        app.manager.metadata_standards().kind_label()
                    }
                    _ => app
                        .manager
                        .option_list(*field)
                        .map_or("value", |list| list.kind().label()),
                };
                forms::draw_custom_entry_form(frame, form, kind);
            }
        }
        Focus::EditText { target, buffer } => {
            let title = match target {
                TextTarget::FieldValue(id) => format!("Edit {}", id.label().to_lowercase()),
                TextTarget::AdditionalLabel(_) => "Additional field label".to_string(),
            };
            forms::draw_text_editor(frame, buffer, &title);
        }
    }

    layout::draw_status_bar(frame, status_area, app);
}

fn draw_catalog(frame: &mut Frame, app: &App, field: StandardFieldId) {
    let searching = matches!(app.focus, Focus::Search(_));
    match field {
        StandardFieldId::RepoSelector => catalog::draw_modal(
            frame,
            app.manager.repositories(),
            &app.search_input,
            searching,
            app.modal_cursor,
        ),
        _ => catalog::draw_modal(
            frame,
            app.manager.metadata_standards(),
            &app.search_input,
            searching,
            app.modal_cursor,
        ),
    }
}
