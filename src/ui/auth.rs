//! Login / registration form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::domain::app::{AuthFormState, AuthView};

use super::widgets::{field_stack, render_field, render_status};
use super::{centered_column, screen_title};

pub fn render(frame: &mut Frame, area: Rect, state: &AuthFormState) {
    let (title, subtitle) = match state.view {
        AuthView::Login => ("Welcome Back", "Sign in to continue"),
        AuthView::Register => ("Create Your Account", "For licensed healthcare professionals"),
    };

    let column = centered_column(area, 54);
    let field_count = state.visible_fields().len();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(2), // Role selector
            Constraint::Min(0),    // Fields
            Constraint::Length(2), // Status line
        ])
        .split(column);

    frame.render_widget(Paragraph::new(screen_title(title, subtitle)), chunks[0]);
    render_role_selector(frame, chunks[1], state);

    let slots = field_stack(chunks[2], field_count);
    for (slot, index) in slots.iter().zip(state.visible_fields()) {
        render_field(frame, *slot, &state.fields[index], index == state.selected);
    }

    render_status(frame, chunks[3], state.busy, state.message.as_ref());
}

fn render_role_selector(frame: &mut Frame, area: Rect, state: &AuthFormState) {
    let line = Line::from(vec![
        Span::styled(" Role: ", Style::default().fg(Color::Gray)),
        Span::styled("◄ ", Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("I am a {}", state.role.display_name()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ►", Style::default().fg(Color::Yellow)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
