//! UI rendering functions for the TUI.
//!
//! Lays out the title, query input, result panel and shortcut bar, and draws
//! notifications on top of them in the upper-right corner.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::{App, Focus};
use crate::presentation;
use crate::submission::{Notification, NotificationKind};

pub const TITLE: &str = "RAG Research Paper Assistant";
pub const INPUT_LABEL: &str = "Enter your research query";
pub const INPUT_PLACEHOLDER: &str = "What would you like to know about the research papers?";
const RESULT_PLACEHOLDER: &str = "Submit a query to see the answer and its sources.";

const NOTIFICATION_WIDTH: u16 = 48;
const NOTIFICATION_HEIGHT: u16 = 4;

/// Main rendering function for the TUI.
pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Query input
            Constraint::Min(0),    // Result panel
            Constraint::Length(1), // Shortcut bar
        ])
        .split(size);

    render_title(frame, chunks[0]);
    render_query_input(frame, app, chunks[1]);
    render_result(frame, app, chunks[2]);
    render_shortcut_bar(frame, app, chunks[3]);
    render_notifications(frame, app.notifications(), size);
}

fn focus_border(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Span::styled(
        TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);

    frame.render_widget(title, area);
}

/// Renders the query input.
///
/// Shows a placeholder while empty and a cursor when focused. While a query
/// is in flight the input is dimmed and a spinner replaces the cursor.
fn render_query_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = matches!(app.focus(), Focus::QueryInput);
    let dim = Style::default().fg(Color::DarkGray);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(INPUT_LABEL)
        .border_style(if app.is_pending() {
            dim
        } else {
            focus_border(is_focused)
        });

    let line = if app.is_pending() {
        Line::from(vec![
            Span::styled(app.input(), dim),
            Span::raw("  "),
            Span::styled(
                format!("{} Submitting...", app.spinner()),
                Style::default().fg(Color::Yellow),
            ),
        ])
    } else if app.input().is_empty() {
        let mut spans = Vec::new();
        if is_focused {
            spans.push(Span::raw("█"));
        }
        spans.push(Span::styled(
            INPUT_PLACEHOLDER,
            dim.add_modifier(Modifier::ITALIC),
        ));
        Line::from(spans)
    } else {
        let mut spans = vec![Span::raw(app.input())];
        if is_focused {
            spans.push(Span::raw("█"));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Renders the result panel: the last successful answer, or a placeholder.
fn render_result(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Result")
        .border_style(focus_border(matches!(app.focus(), Focus::Results)));

    let content = match app.displayed() {
        Some(response) => presentation::render_response(response),
        None => Text::from(Span::styled(
            RESULT_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        )),
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.result_scroll(), 0));

    frame.render_widget(paragraph, area);
}

/// Renders the shortcut bar at the bottom of the screen.
///
/// Format: `Key: action | Key: action` with keys highlighted in cyan.
fn render_shortcut_bar(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default().fg(Color::Cyan);
    let sep_style = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled("Ctrl+C", key_style),
        Span::raw(": quit"),
        Span::styled(" | ", sep_style),
        Span::styled("Tab", key_style),
        Span::raw(": switch panel"),
    ];

    match app.focus() {
        Focus::QueryInput => {
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("Enter", key_style));
            spans.push(Span::raw(": submit query"));
        }
        Focus::Results => {
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("j/k", key_style));
            spans.push(Span::raw(": scroll"));
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("q", key_style));
            spans.push(Span::raw(": quit"));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Area of the `index`-th notification, stacked down from the top-right
/// corner of `area`. `None` once the stack runs out of room.
fn notification_area(area: Rect, index: u16) -> Option<Rect> {
    let width = NOTIFICATION_WIDTH.min(area.width);
    let y = area.y + 1 + index.checked_mul(NOTIFICATION_HEIGHT)?;
    if y + NOTIFICATION_HEIGHT > area.y + area.height {
        return None;
    }
    Some(Rect::new(area.x + area.width - width, y, width, NOTIFICATION_HEIGHT))
}

/// Draws visible notifications, newest on top.
fn render_notifications(frame: &mut Frame, notifications: &[Notification], area: Rect) {
    for (index, notification) in notifications.iter().rev().enumerate() {
        let Some(rect) = u16::try_from(index)
            .ok()
            .and_then(|i| notification_area(area, i))
        else {
            break;
        };

        let color = match notification.kind() {
            NotificationKind::Success => Color::Green,
            NotificationKind::Error => Color::Red,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                notification.title(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(color));

        let paragraph = Paragraph::new(notification.message())
            .block(block)
            .wrap(Wrap { trim: true });

        frame.render_widget(Clear, rect);
        frame.render_widget(paragraph, rect);
    }
}
