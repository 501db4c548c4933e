//! Medicine registration form and tag-id result panel.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::app::MedicineFormState;

use super::widgets::{field_stack, render_field, render_status};
use super::{centered_column, screen_title};

pub fn render(frame: &mut Frame, area: Rect, state: &MedicineFormState) {
    let column = centered_column(area, 64);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Title
            Constraint::Length(13), // Form fields
            Constraint::Length(2),  // Status line
            Constraint::Min(0),     // Tag id + QR panel
        ])
        .split(column);

    frame.render_widget(
        Paragraph::new(screen_title(
            "Register New Medicine",
            "Issues a tag id for the batch",
        )),
        chunks[0],
    );

    let slots = field_stack(chunks[1], state.fields.len());
    for (index, field) in state.fields.iter().enumerate() {
        render_field(frame, slots[index], field, index == state.selected);
    }

    render_status(frame, chunks[2], state.busy, state.message.as_ref());

    if let Some(tag_id) = &state.tag_id {
        render_tag_panel(frame, chunks[3], tag_id, state.qr_url.as_deref());
    }
}

fn render_tag_panel(frame: &mut Frame, area: Rect, tag_id: &str, qr_url: Option<&str>) {
    let mut lines = vec![
        Line::from(Span::styled(
            " Generated Tag ID",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!(" {tag_id}"),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    if let Some(url) = qr_url {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            " QR code (open in a browser or scan from there):",
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(Span::styled(
            format!(" {url}"),
            Style::default().fg(Color::Cyan),
        )));
    }

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(panel, area);
}
