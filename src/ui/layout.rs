//! Screen layout and status bar

use crate::app::{App, Focus};
use research_output_fields::events::NotificationKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into the fields list, the detail panel and the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[0]);

    (columns[0], columns[1], rows[1])
}

fn focus_hints(focus: &Focus) -> &'static str {
    match focus {
        Focus::Fields => " ↑↓:move  Space:toggle  Enter:expand  q:quit",
        Focus::Catalog(_) => " Space:select  /:search  ←→:page  Esc:close",
        Focus::Search(_) => " type to filter  Enter:done  Esc:clear",
        Focus::CustomForm(_) => " Tab:next field  Enter:add  Esc:cancel",
        Focus::ConfirmRemoveAll { .. } => " y:remove all  n:cancel",
        Focus::EditText { .. } => " Enter:save  Esc:discard",
    }
}

/// Draw the status bar: key hints, then the local hint or latest notification
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        focus_hints(&app.focus),
        Style::default().fg(Color::Black),
    )];

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(Color::Yellow)));
    } else if let Some(notification) = app.notifications.latest() {
        let color = match notification.kind {
            NotificationKind::Success => Color::Green,
            NotificationKind::Error => Color::Red,
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(notification.message, Style::default().fg(color)));
    }

    let changes = app.changes.len();
    if changes > 0 {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("{changes} unsaved changes"),
            Style::default().fg(Color::Blue),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
