//! UI module - TUI rendering components.
//!
//! One renderer per screen, plus the persistent header (product name,
//! capability-filtered navigation, session status) and a footer of key
//! hints. Renderers are free functions over immutable state; all mutation
//! happens in the domain layer.

mod auth;
mod home;
mod logs;
mod register;
mod verify;
mod widgets;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{visible_nav_links, App, Screen};

/// Render the whole frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header + navigation
            Constraint::Min(0),    // Screen body
            Constraint::Length(2), // Key hints
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    match app.screen {
        Screen::Home => home::render(frame, chunks[1], app),
        Screen::Auth => auth::render(frame, chunks[1], &app.auth),
        Screen::RegisterMedicine => register::render(frame, chunks[1], &app.medicine),
        Screen::VerifyMedicine => verify::render(frame, chunks[1], &app.verify),
        Screen::ViewLogs => logs::render(frame, chunks[1], &app.logs),
    }

    render_footer(frame, chunks[2], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            " PharmaChain ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│", Style::default().fg(Color::DarkGray)),
    ];

    for link in visible_nav_links(app.session.as_ref()) {
        spans.push(Span::styled(
            format!(" [{}] ", link.hotkey),
            Style::default().fg(Color::Yellow),
        ));
        let style = if app.screen == link.screen {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(link.label, style));
    }

    spans.push(Span::styled("  │ ", Style::default().fg(Color::DarkGray)));
    match &app.session {
        Some(session) => {
            spans.push(Span::styled(
                format!("{} ", session.role.display_name()),
                Style::default().fg(Color::Green),
            ));
            spans.push(Span::styled("[X] Logout", Style::default().fg(Color::Gray)));
        }
        None => {
            spans.push(Span::styled("[L] Login ", Style::default().fg(Color::Gray)));
            spans.push(Span::styled(
                "[N] Register",
                Style::default().fg(Color::Gray),
            ));
        }
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let hints: &[(&str, &str)] = match app.screen {
        Screen::Home => &[("Hotkeys", "Navigate"), ("Ctrl+Q", "Quit")],
        Screen::Auth => &[
            ("↑↓/Tab", "Field"),
            ("←→", "Role"),
            ("F2", "Login/Register"),
            ("Enter", "Submit"),
            ("Esc", "Home"),
        ],
        Screen::RegisterMedicine => &[
            ("↑↓/Tab", "Field"),
            ("Enter", "Submit"),
            ("Esc", "Home"),
        ],
        Screen::VerifyMedicine => &[("Enter", "Verify"), ("Esc", "Home")],
        Screen::ViewLogs => &[
            ("Enter", "Search"),
            ("↑↓", "Scroll"),
            ("Ctrl+E", "Export PDF"),
            ("Esc", "Home"),
        ],
    };

    let mut spans = Vec::with_capacity(hints.len() * 2 + 1);
    spans.push(Span::raw(" "));
    for (key, action) in hints {
        spans.push(Span::styled(
            format!("[{key}] "),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("{action}  "),
            Style::default().fg(Color::Gray),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(footer, area);
}

/// Title line shared by the screen renderers.
fn screen_title(title: &str, subtitle: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {title}"),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" │ {subtitle}"),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Center a fixed-width column inside the given area.
fn centered_column(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}
