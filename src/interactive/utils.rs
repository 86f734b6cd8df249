//! Utility functions for the interactive UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use super::messages::MessageType;
use crate::schedule::contrast::parse_hex_rgb;
use crate::schedule::Background;

/// Terminal color for a `#RRGGBB` value; anything unparseable renders as `fallback`
pub fn hex_color(hex: &str, fallback: Color) -> Color {
    match parse_hex_rgb(hex) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => fallback,
    }
}

/// Style for a badge with the given background and text colors
pub fn badge_style(background: &str, text: &str) -> Style {
    Style::default()
        .bg(hex_color(background, Color::Reset))
        .fg(hex_color(text, Color::White))
}

/// Spans drawing `text` over a cell background, centered in `width` columns.
///
/// Split backgrounds paint the left half in the shift color and the right
/// half in the task color.
pub fn cell_spans(
    text: &str,
    background: &Background,
    text_color: &str,
    width: usize,
) -> Vec<Span<'static>> {
    let padded = center(text, width);
    let fg = hex_color(text_color, Color::Reset);
    match background {
        Background::None => vec![Span::styled(padded, Style::default().fg(fg))],
        Background::Solid { color } => vec![Span::styled(
            padded,
            Style::default().bg(hex_color(color, Color::Reset)).fg(fg),
        )],
        Background::Split { shift, task } => {
            let chars: Vec<char> = padded.chars().collect();
            let half = chars.len() / 2;
            let left: String = chars[..half].iter().collect();
            let right: String = chars[half..].iter().collect();
            vec![
                Span::styled(left, Style::default().bg(hex_color(shift, Color::Reset)).fg(fg)),
                Span::styled(right, Style::default().bg(hex_color(task, Color::Reset)).fg(fg)),
            ]
        }
    }
}

/// Center `text` in `width` columns, truncating when it does not fit
pub fn center(text: &str, width: usize) -> String {
    let text = truncate_str(text, width);
    let len = text.chars().count();
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Get style for message type
pub fn get_message_style(message_type: MessageType) -> Style {
    match message_type {
        MessageType::Info => Style::default().fg(Color::Cyan),
        MessageType::Success => Style::default().fg(Color::Green),
        MessageType::Warning => Style::default().fg(Color::Yellow),
        MessageType::Error => Style::default().fg(Color::Red),
    }
}

/// Truncate to at most `max_width` characters, without an ellipsis
pub fn truncate_str(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Rectangle of the given percentage size centered in `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
