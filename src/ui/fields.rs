//! Fields list and detail panel

use super::widgets::render_scrollable_list;
use crate::app::{App, Row};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use research_output_fields::state::{
    AdditionalField, FieldsManager, ModeView, StandardFieldId,
};

/// Draw the list of standard and additional fields
pub fn draw_list(frame: &mut Frame, area: Rect, app: &App) {
    let manager = &app.manager;
    let items: Vec<ListItem> = app
        .rows()
        .into_iter()
        .map(|row| match row {
            Row::Standard(id) => standard_item(manager, id),
            Row::Additional(id) => match manager.additional_field(&id) {
                Some(field) => additional_item(field),
                None => ListItem::new(id),
            },
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Research output fields ")
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    render_scrollable_list(frame, area, list, app.cursor);
}

fn checkbox(enabled: bool) -> Span<'static> {
    if enabled {
        Span::styled("[x] ", Style::default().fg(Color::Green))
    } else {
        Span::styled("[ ] ", Style::default().fg(Color::DarkGray))
    }
}

fn standard_item(manager: &FieldsManager, id: StandardFieldId) -> ListItem<'static> {
    let expanded = manager.is_expanded(id);
    let mut header = vec![checkbox(manager.is_enabled(id)), Span::raw(id.label())];
    if manager.is_locked(id) {
        header.push(Span::styled(
            "  (required)",
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(mode) = manager.mode(id) {
        header.push(Span::styled(
            format!("  {}", mode.label()),
            Style::default().fg(Color::Yellow),
        ));
    }
    if id == StandardFieldId::DataFlags {
        header.push(Span::styled(
            format!("  {}", manager.data_flags_mode().label()),
            Style::default().fg(Color::Yellow),
        ));
    }
    if id.has_modes() {
        let marker = if expanded { "  ▾" } else { "  ▸" };
        header.push(Span::styled(marker, Style::default().fg(Color::DarkGray)));
    }

    let mut lines = vec![Line::from(header)];
    if expanded {
        lines.extend(panel_lines(manager, id).into_iter().map(indent));
    }
    ListItem::new(lines)
}

fn additional_item(field: &AdditionalField) -> ListItem<'static> {
    let label = if field.display_label().is_empty() {
        Span::styled("(untitled field)", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(field.display_label().to_string())
    };
    ListItem::new(Line::from(vec![
        checkbox(field.enabled),
        Span::styled("+ ", Style::default().fg(Color::Cyan)),
        label,
    ]))
}

fn indent(line: Line<'static>) -> Line<'static> {
    let mut spans = vec![Span::raw("      ")];
    spans.extend(line.spans);
    Line::from(spans)
}

fn section<T>(title: &str, values: &[T], name: impl Fn(&T) -> String) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("{title}:"),
        Style::default().add_modifier(Modifier::UNDERLINED),
    ))];
    if values.is_empty() {
        lines.push(Line::from(Span::styled(
            "  none yet",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.extend(values.iter().map(|v| Line::from(format!("  • {}", name(v)))));
    lines
}

fn mode_lines<T>(view: ModeView<'_, T>, name: impl Fn(&T) -> String + Copy) -> Vec<Line<'static>> {
    match view {
        ModeView::Defaults { defaults } => section("Defaults", defaults, name),
        ModeView::Custom { custom } => section("Custom", custom, name),
        ModeView::Merged { defaults, custom } => {
            let mut lines = section("Defaults", defaults, name);
            lines.extend(section("Custom", custom, name));
            lines
        }
    }
}

/// Mode-specific contents of a field's customization panel
fn panel_lines(manager: &FieldsManager, id: StandardFieldId) -> Vec<Line<'static>> {
    match id {
        StandardFieldId::OutputType | StandardFieldId::Licenses => manager
            .option_list(id)
            .map(|list| mode_lines(list.mode_view(), |e| e.name.clone()))
            .unwrap_or_default(),
        StandardFieldId::RepoSelector => {
            mode_lines(manager.repositories().mode_view(), |r| r.name.clone())
        }
        StandardFieldId::MetadataStandards => {
            mode_lines(manager.metadata_standards().mode_view(), |s| s.name.clone())
        }
        StandardFieldId::DataFlags => {
            let flags = manager.data_flags();
            vec![
                Line::from(format!("Sensitive data: {}", yes_no(flags.show_sensitive_data))),
                Line::from(format!("Personal data: {}", yes_no(flags.show_personal_data))),
            ]
        }
        StandardFieldId::Title | StandardFieldId::Description => {
            let value = &manager.field(id).value;
            if value.is_empty() {
                vec![Line::from(Span::styled(
                    "(empty)",
                    Style::default().fg(Color::DarkGray),
                ))]
            } else {
                vec![Line::from(value.clone())]
            }
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "shown"
    } else {
        "hidden"
    }
}

/// Draw details and key hints for the row under the cursor
pub fn draw_detail(frame: &mut Frame, area: Rect, app: &App) {
    let manager = &app.manager;
    let (title, mut lines) = match app.current_row() {
        Some(Row::Standard(id)) => {
            let mut lines = Vec::new();
            if let Some(reason) = manager.locked_reason(id) {
                lines.push(Line::from(Span::styled(
                    reason,
                    Style::default().fg(Color::Yellow),
                )));
                lines.push(Line::from(""));
            }
            lines.extend(panel_lines(manager, id));
            (id.label().to_string(), lines)
        }
        Some(Row::Additional(id)) => match manager.additional_field(&id) {
            Some(field) => ("Additional field".to_string(), additional_lines(field)),
            None => ("Additional field".to_string(), Vec::new()),
        },
        None => (String::new(), Vec::new()),
    };

    lines.push(Line::from(""));
    lines.extend(row_hints(app.current_row(), manager));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL),
        );
    frame.render_widget(paragraph, area);
}

fn additional_lines(field: &AdditionalField) -> Vec<Line<'static>> {
    let or_dash = |s: &str| {
        if s.is_empty() {
            "-".to_string()
        } else {
            s.to_string()
        }
    };
    vec![
        Line::from(format!("Id: {}", field.id)),
        Line::from(format!("Label: {}", or_dash(&field.label))),
        Line::from(format!(
            "Custom label: {}",
            or_dash(field.custom_label.as_deref().unwrap_or(""))
        )),
        Line::from(format!("Help text: {}", or_dash(&field.help_text))),
        Line::from(format!(
            "Max length: {}",
            field
                .max_length
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string())
        )),
        Line::from(format!("Default value: {}", or_dash(&field.default_value))),
    ]
}

fn row_hints(row: Option<Row>, manager: &FieldsManager) -> Vec<Line<'static>> {
    let key = Style::default().fg(Color::Cyan);
    let text = Style::default().fg(Color::DarkGray);
    let hint = |k: &'static str, t: &'static str| {
        Line::from(vec![Span::styled(k, key), Span::styled(t, text)])
    };

    let mut lines = vec![hint("Space", " enable / disable")];
    match row {
        Some(Row::Standard(id)) => {
            if id.has_modes() {
                lines.push(hint("Enter", " expand panel"));
                lines.push(hint("m", " cycle mode"));
            }
            if id.is_catalog_selector() {
                lines.push(hint("o", " browse catalog"));
                if manager.is_expanded(id) {
                    lines.push(hint("x", " remove last selected item"));
                }
            }
            if manager.option_list(id).is_some() {
                let exposes_custom = manager
                    .mode(id)
                    .is_some_and(|mode| mode.exposes_custom());
                if exposes_custom {
                    lines.push(hint("c", " add custom value"));
                    lines.push(hint("x", " remove last custom value"));
                }
            }
            if id == StandardFieldId::DataFlags {
                lines.push(hint("f", " cycle data flags"));
            }
            if matches!(id, StandardFieldId::Title | StandardFieldId::Description) {
                lines.push(hint("e", " edit value"));
            }
        }
        Some(Row::Additional(_)) => {
            lines.push(hint("e", " edit label"));
            lines.push(hint("d", " delete field"));
        }
        None => {}
    }
    lines.push(hint("a", " add additional field"));
    lines
}
