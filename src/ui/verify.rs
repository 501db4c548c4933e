//! Verification lookup and result card.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::app::VerifyScreenState;

use super::widgets::{render_input, render_status};
use super::{centered_column, screen_title};

pub fn render(frame: &mut Frame, area: Rect, state: &VerifyScreenState) {
    let column = centered_column(area, 64);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(3), // Tag id input
            Constraint::Length(2), // Status line
            Constraint::Min(0),    // Result card
        ])
        .split(column);

    frame.render_widget(
        Paragraph::new(screen_title(
            "Verify Your Medicine",
            "Enter the tag id printed on the packaging",
        )),
        chunks[0],
    );

    render_input(frame, chunks[1], "Tag ID", &state.tag_id, true);
    render_status(frame, chunks[2], state.busy, state.message.as_ref());

    if let Some(result) = &state.result {
        if result.found {
            if let Some(medicine) = &result.medicine {
                render_result_card(frame, chunks[3], medicine);
            }
        }
    }
}

fn render_result_card(frame: &mut Frame, area: Rect, medicine: &crate::api::Medicine) {
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {}", medicine.name),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  ✔ Verified", Style::default().fg(Color::Green)),
        ]),
        Line::raw(""),
        detail("Manufacturer", &medicine.manufacturer),
        detail("Batch Number", &medicine.batch),
        detail("Expiry Date", &medicine.expiry),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(card, area);
}

fn detail<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {label}: "), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}
