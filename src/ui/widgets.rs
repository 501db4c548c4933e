//! Reusable UI components shared by the screen renderers.

use std::rc::Rc;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::app::{FormField, MessageKind, StatusMessage};

/// Height of one rendered form field, border included.
pub const FIELD_HEIGHT: u16 = 3;

/// Split an area into stacked field slots plus a remainder.
pub fn field_stack(area: Rect, count: usize) -> Rc<[Rect]> {
    let constraints: Vec<Constraint> = (0..count)
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area)
}

/// Render a single bordered input field.
///
/// Masked fields render dots instead of the buffer contents.
pub fn render_field(frame: &mut Frame, area: Rect, field: &FormField, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title_style = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let shown = if field.masked {
        "•".repeat(field.value.chars().count())
    } else {
        field.value.clone()
    };

    let mut spans = vec![Span::raw(" "), Span::raw(shown)];
    if selected {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, area);
}

/// Render a plain single-line input (the lookup-key inputs).
pub fn render_input(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![Span::raw(" "), Span::raw(value.to_string())];
    if focused {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }
    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(Span::styled(
                format!(" {label} "),
                Style::default().fg(Color::Cyan),
            ))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, area);
}

/// Styled line for an inline status message.
pub fn message_line(message: &StatusMessage) -> Line<'_> {
    let color = match message.kind {
        MessageKind::Success => Color::Green,
        MessageKind::Error => Color::Red,
        MessageKind::Info => Color::Yellow,
    };
    Line::from(vec![
        Span::raw(" "),
        Span::styled(message.text.as_str(), Style::default().fg(color)),
    ])
}

/// Loading indicator shown while a request is in flight.
pub fn busy_line() -> Line<'static> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            "Working...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ),
    ])
}

/// Status or busy line for a screen footer slot.
pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    busy: bool,
    message: Option<&StatusMessage>,
) {
    let line = if busy {
        busy_line()
    } else if let Some(message) = message {
        message_line(message)
    } else {
        Line::raw("")
    };
    frame.render_widget(Paragraph::new(line), area);
}
