use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use signcoach_lib::session::display::{NO_ITEMS_HINT, NO_ITEMS_TITLE};

use super::app_state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let rows = state.manage_rows();
    let total = state.app.session.library().len();

    let block = Block::default()
        .title(format!(" Manage ({} of {}) ", rows.len(), total))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if rows.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", NO_ITEMS_TITLE),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("  {} (press a)", NO_ITEMS_HINT),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let picture = if row.has_image { " \u{25a3}" } else { "" };
            let mut lines = vec![Line::from(vec![
                Span::styled(row.word.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(picture, Style::default().fg(Color::Magenta)),
                Span::styled(format!("  {}", row.meta()), Style::default().fg(Color::Yellow)),
            ])];
            lines.push(Line::from(format!("  {}", row.meaning)));
            if let Some(tip) = &row.tip {
                lines.push(Line::from(Span::styled(
                    format!("  Tip: {}", tip),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.manage_selected));

    f.render_stateful_widget(list, area, &mut list_state);
}
