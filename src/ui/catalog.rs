//! Catalog browse modal shared by the repository and metadata standard selectors

use super::widgets::{centered_rect, render_scrollable_list, truncate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};
use research_output_fields::state::{CatalogRecord, CatalogSelector, FormField};

/// Draw the browse modal for `selector`
pub fn draw_modal<R: CatalogRecord>(
    frame: &mut Frame,
    selector: &CatalogSelector<R>,
    search: &FormField,
    searching: bool,
    cursor: usize,
) {
    let outer = frame.area();
    let area = centered_rect(
        outer,
        outer.width.saturating_sub(8).max(40),
        outer.height.saturating_sub(4).max(12),
    );
    frame.render_widget(Clear, area);

    let title = format!(
        " Browse {} ({}) ",
        R::KIND.plural(),
        selector.mode().label()
    );
    frame.render_widget(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black)),
        area,
    );

    let inner = area.inner(Margin::new(1, 1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Search
            Constraint::Min(3),    // Results + selection
            Constraint::Length(1), // Pagination
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    draw_search(frame, rows[0], search, searching);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[1]);
    draw_results(frame, columns[0], selector, cursor);
    draw_selection(frame, columns[1], selector);

    let footer = if selector.is_loading() {
        Span::styled("Loading...", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            selector.pagination_summary(),
            Style::default().fg(Color::DarkGray),
        )
    };
    frame.render_widget(Paragraph::new(Line::from(footer)), rows[2]);

    frame.render_widget(Paragraph::new(hints()), rows[3]);
}

fn draw_search(frame: &mut Frame, area: Rect, search: &FormField, active: bool) {
    let style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![
        Span::styled("/ ", style),
        Span::styled(search.as_text(), Style::default().fg(Color::White)),
    ];
    if active {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_results<R: CatalogRecord>(
    frame: &mut Frame,
    area: Rect,
    selector: &CatalogSelector<R>,
    cursor: usize,
) {
    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = selector
        .visible_items()
        .into_iter()
        .map(|record| {
            let selected = selector.is_selected(record.id());
            let action = selector.action_label(record.id());
            let action_style = if selected {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            };
            let mut lines = vec![Line::from(vec![
                Span::styled(format!("[{action}] "), action_style),
                Span::styled(
                    truncate(record.name(), width.saturating_sub(10)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])];
            if selector.is_expanded(record.id()) {
                if !record.description().is_empty() {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", truncate(record.description(), width)),
                        Style::default().fg(Color::Gray),
                    )));
                }
                if !record.uri().is_empty() {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", record.uri()),
                        Style::default().fg(Color::Blue),
                    )));
                }
            }
            ListItem::new(lines)
        })
        .collect();

    let empty = items.is_empty();
    let list = List::new(items)
        .block(Block::default().title(" Results ").borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▸ ");
    if empty {
        let message = if selector.search_term().trim().is_empty() {
            "No results"
        } else {
            "No results on this page match the search"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray)))
                .block(Block::default().title(" Results ").borders(Borders::ALL)),
            area,
        );
    } else {
        render_scrollable_list(frame, area, list, cursor);
    }
}

fn draw_selection<R: CatalogRecord>(
    frame: &mut Frame,
    area: Rect,
    selector: &CatalogSelector<R>,
) {
    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = selector
        .selection()
        .iter()
        .map(|record| {
            let marker = if record.id().is_custom() { "* " } else { "  " };
            ListItem::new(Line::from(format!(
                "{marker}{}",
                truncate(record.name(), width.saturating_sub(2))
            )))
        })
        .collect();

    let title = format!(" Selected ({}) ", selector.selection().len());
    frame.render_widget(
        List::new(items).block(Block::default().title(title).borders(Borders::ALL)),
        area,
    );
}

fn hints() -> Line<'static> {
    let key = Style::default().fg(Color::Cyan);
    let text = Style::default().fg(Color::DarkGray);
    Line::from(vec![
        Span::styled("Space", key),
        Span::styled(" toggle  ", text),
        Span::styled("/", key),
        Span::styled(" search  ", text),
        Span::styled("←→", key),
        Span::styled(" page  ", text),
        Span::styled("i", key),
        Span::styled(" details  ", text),
        Span::styled("c", key),
        Span::styled(" custom  ", text),
        Span::styled("X", key),
        Span::styled(" remove all  ", text),
        Span::styled("Esc", key),
        Span::styled(" close", text),
    ])
}
