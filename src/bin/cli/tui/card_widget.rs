use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::render::terminal;

use super::app_state::TuiState;

pub fn draw_learn(f: &mut Frame, area: Rect, state: &TuiState) {
    let card = state.app.session.learn_card();
    let lines = terminal::render_learn_card(&card, false);

    let mut text: Vec<Line> = Vec::with_capacity(lines.len());
    for (i, line) in lines.into_iter().enumerate() {
        let style = match i {
            0 => Style::default().fg(Color::DarkGray),
            2 => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            _ if card.is_empty() => Style::default().fg(Color::DarkGray),
            _ => Style::default(),
        };
        text.push(Line::from(Span::styled(line, style)));
    }

    let paragraph = Paragraph::new(text)
        .block(card_block(" Learn "))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

pub fn draw_practice(f: &mut Frame, area: Rect, state: &TuiState) {
    let card = state.app.session.practice_card();
    let lines = terminal::render_practice_card(&card, false);

    let mut text: Vec<Line> = lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let style = if i == 0 {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else if card.revealed {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(line, style))
        })
        .collect();

    if !card.is_empty() {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            format!("[space] {}   [n] Next", card.reveal_label()),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(text)
        .block(card_block(" Practice "))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn card_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}
