//! Landing screen.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::{visible_nav_links, App};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            "  PharmaChain",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  Medicine authenticity verification, backed by a tamper-evident ledger.",
            Style::default().fg(Color::Gray),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "  Manufacturers register medicine batches and receive a tag id; pharmacies",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "  verify tags at the counter; anyone can audit the per-tag event log.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::raw(""),
    ];

    for link in visible_nav_links(app.session.as_ref()) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  [{}] ", link.hotkey),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(link.label, Style::default().fg(Color::White)),
        ]));
    }

    lines.push(Line::raw(""));
    match &app.session {
        Some(session) => {
            lines.push(Line::from(vec![
                Span::styled("  Signed in as ", Style::default().fg(Color::Gray)),
                Span::styled(
                    session.role.display_name(),
                    Style::default().fg(Color::Green),
                ),
                Span::styled("  ·  [X] to log out", Style::default().fg(Color::DarkGray)),
            ]));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "  Not signed in  ·  [L] to log in, [N] to create an account",
                Style::default().fg(Color::Gray),
            )));
        }
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::NONE));
    frame.render_widget(body, area);
}
