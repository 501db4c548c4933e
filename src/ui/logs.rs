//! Log viewing screen: lookup input plus the seven-column event table.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::domain::app::LogsScreenState;

use super::widgets::{render_input, render_status};
use super::screen_title;

pub fn render(frame: &mut Frame, area: Rect, state: &LogsScreenState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(3), // Tag id input
            Constraint::Length(2), // Status line
            Constraint::Min(0),    // Table
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(screen_title(
            "Verification Logs",
            "Registration and verification events per tag id",
        )),
        chunks[0],
    );

    render_input(frame, chunks[1], "Tag ID", &state.tag_id, true);
    render_status(frame, chunks[2], state.busy, state.message.as_ref());

    if !state.rows.is_empty() && !state.busy {
        render_table(frame, chunks[3], state);
    }
}

fn render_table(frame: &mut Frame, area: Rect, state: &LogsScreenState) {
    let header = Row::new([
        "Date",
        "Time",
        "Medicine",
        "Batch Number",
        "Status",
        "Initialized By",
        "Transaction Hash",
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows = state.rows.iter().skip(state.scroll).map(|row| {
        let status_color = match row.status {
            "Verified" => Color::Green,
            _ => Color::Yellow,
        };
        Row::new(vec![
            Cell::from(row.date.clone()),
            Cell::from(row.time.clone()),
            Cell::from(row.medicine.clone()),
            Cell::from(row.batch.clone()),
            Cell::from(Span::styled(row.status, Style::default().fg(status_color))),
            Cell::from(row.actor),
            Cell::from(Span::styled(
                row.hash.clone(),
                Style::default().fg(Color::DarkGray),
            )),
        ])
    });

    let widths = [
        Constraint::Length(11),
        Constraint::Length(9),
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                format!(" {} entries ", state.rows.len()),
                Style::default().fg(Color::Gray),
            )),
    );
    frame.render_widget(table, area);
}
