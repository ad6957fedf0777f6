//! Yes/no prompt shown before clearing a Selection Set

use crate::ui::widgets::centered_rect;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const TITLE: &str = "Confirm Remove";
const MAX_WIDTH: u16 = 50;

/// Render the remove-all prompt centered over the catalog modal
pub fn render_confirm_dialog(frame: &mut Frame, prompt: &str) {
    // Border plus one column of padding each side
    let inner_width = MAX_WIDTH.saturating_sub(4) as usize;
    let prompt_lines = wrap_prompt(prompt, inner_width);

    let text_width = prompt_lines
        .iter()
        .map(|l| l.chars().count())
        .chain([TITLE.len(), hint_width()])
        .max()
        .unwrap_or(0) as u16;
    let width = (text_width + 4).min(MAX_WIDTH);
    // title, blank, prompt, blank, hint, borders
    let height = prompt_lines.len() as u16 + 6;

    let area = centered_rect(frame.area(), width, height);
    frame.render_widget(Clear, area);

    let mut content = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(prompt_lines.into_iter().map(Line::from));
    content.push(Line::from(""));
    content.push(hint());

    let dialog = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(dialog, area);
}

fn hint() -> Line<'static> {
    Line::from(vec![
        Span::styled("y", Style::default().fg(Color::Cyan)),
        Span::styled(" remove  ", Style::default().fg(Color::DarkGray)),
        Span::styled("n/Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
    ])
}

fn hint_width() -> usize {
    hint().width()
}

/// Break the prompt on word boundaries so no line exceeds `width`
fn wrap_prompt(prompt: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in prompt.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
