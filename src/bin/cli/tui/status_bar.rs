use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use signcoach_lib::ViewMode;

use super::app_state::{Mode, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    // Show flash message if present
    if let Some(ref msg) = state.flash_message {
        let flash = Paragraph::new(format!(" {}", msg))
            .style(Style::default().bg(Color::Green).fg(Color::Black));
        f.render_widget(flash, area);
        return;
    }

    let prompt = |label: &str, bg: Color| {
        Paragraph::new(format!(" {}: {}\u{2588}", label, state.input_text))
            .style(Style::default().bg(bg).fg(Color::White))
    };

    match state.mode {
        Mode::Search => f.render_widget(prompt("Search", Color::Blue), area),
        Mode::AddCard => f.render_widget(
            prompt("word; meaning; category; difficulty; tip [; @picture]", Color::Blue),
            area,
        ),
        Mode::EditCard => f.render_widget(
            prompt("Edit [; @new picture]", Color::Blue),
            area,
        ),
        Mode::ProfileName => f.render_widget(prompt("Child's name", Color::Magenta), area),
        Mode::ConfirmReset => {
            let confirm = Paragraph::new(" Replace the library with the default cards? (y/N)")
                .style(Style::default().bg(Color::Red).fg(Color::White));
            f.render_widget(confirm, area);
        }
        Mode::Normal => {
            let filter = state.app.session.filter();
            let mut text = format!(" [{}]", filter.category);
            if !filter.query.is_empty() {
                text.push_str(&format!(" \"{}\"", filter.query));
            }

            let hints = match state.view() {
                ViewMode::Learn => "  h/l: prev/next  s: shuffle",
                ViewMode::Practice => "  space: reveal  n: next",
                ViewMode::Manage => "  j/k: move  a: add  e: edit  d: delete  R: reset",
            };
            text.push_str(hints);
            text.push_str("  /: search  c: category  ?: help  q: quit");

            let status = Paragraph::new(text)
                .style(Style::default().bg(Color::DarkGray).fg(Color::White));
            f.render_widget(status, area);
        }
    }
}
