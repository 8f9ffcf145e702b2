use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs};

use signcoach_lib::ViewMode;

use super::app_state::TuiState;
use super::{card_widget, list_widget, status_bar};

pub fn draw(f: &mut Frame, state: &mut TuiState) {
    let size = f.area();

    // Header, body, status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(size);

    draw_header(f, outer[0], state);

    match state.view() {
        ViewMode::Learn => card_widget::draw_learn(f, outer[1], state),
        ViewMode::Practice => card_widget::draw_practice(f, outer[1], state),
        ViewMode::Manage => list_widget::draw(f, outer[1], state),
    }

    status_bar::draw(f, outer[2], state);

    if state.show_help {
        draw_help(f, size);
    }
}

fn draw_header(f: &mut Frame, area: Rect, state: &TuiState) {
    let session = &state.app.session;
    let selected = ViewMode::ALL
        .iter()
        .position(|m| *m == session.mode())
        .unwrap_or(0);

    let titles: Vec<Line> = ViewMode::ALL
        .iter()
        .enumerate()
        .map(|(i, m)| Line::from(format!("{} {}", i + 1, m.label())))
        .collect();

    let online = session.shell().is_online();
    let status_style = if online {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let block = Block::default()
        .title_top(Line::from(format!(" {} ", session.subtitle())))
        .title_top(
            Line::from(Span::styled(format!(" {} ", session.shell().status_label()), status_style))
                .right_aligned(),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let tabs = Tabs::new(titles)
        .block(block)
        .select(selected)
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    f.render_widget(tabs, area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let lines = vec![
        " 1/2/3, Tab   switch view",
        " /            search",
        " c            next category",
        " p            child's name",
        "",
        " Learn        h/l prev/next, s shuffle",
        " Practice     space reveal, n next",
        " Manage       j/k move, a add, e edit, d delete",
        "              R reset library",
        "",
        " ?            close help    q quit",
    ];

    let width = 54.min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    f.render_widget(Clear, popup);
    let help = Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>()).block(
        Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(help, popup);
}
