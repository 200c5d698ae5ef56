//! Shared styles and layout helpers for the components and the demo

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Common UI styles
pub struct Styles;

impl Styles {
    pub fn default() -> Style {
        Style::default()
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    /// Rows ticked in a selectable table
    pub fn checked_row() -> Style {
        Style::default().bg(Color::Rgb(30, 41, 82))
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Color::Red)
    }

    pub fn success() -> Style {
        Style::default()
            .fg(Color::Green)
    }

    pub fn warning() -> Style {
        Style::default()
            .fg(Color::Yellow)
    }

    pub fn info() -> Style {
        Style::default()
            .fg(Color::Cyan)
    }

    pub fn inactive() -> Style {
        Style::default()
            .fg(Color::Gray)
    }

    pub fn disabled() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    }

    pub fn active_border() -> Style {
        Style::default()
            .fg(Color::Yellow)
    }

    pub fn focused_border() -> Style {
        Style::default()
            .fg(Color::Blue)
    }

    pub fn inactive_border() -> Style {
        Style::default()
            .fg(Color::Gray)
    }
}

/// Center a rectangle within another rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Truncate a string to a display width, ending with an ellipsis when cut
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let target_width = max_width.saturating_sub(1);
    let mut truncated = String::new();
    let mut current_width = 0;

    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > target_width {
            break;
        }
        truncated.push(ch);
        current_width += ch_width;
    }

    if max_width > 0 {
        truncated.push('…');
    }
    truncated
}

/// Plain text content of a styled line
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

/// Display width of the first `chars` characters of `s`
pub fn prefix_width(s: &str, chars: usize) -> usize {
    s.chars().take(chars).map(|ch| ch.width().unwrap_or(0)).sum()
}

/// Screen column of a text cursor `text_width` columns into a bordered box
/// starting at `x`
pub fn cursor_x(x: u16, text_width: usize) -> u16 {
    x.saturating_add(1)
        .saturating_add(u16::try_from(text_width).unwrap_or(u16::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Customer", 20), "Customer");
        assert_eq!(truncate_to_width("Sarah Johnson", 6), "Sarah…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_cursor_x_saturates() {
        assert_eq!(cursor_x(4, 3), 8);
        assert_eq!(cursor_x(10, 100_000), u16::MAX);
        assert_eq!(cursor_x(u16::MAX, 0), u16::MAX);
    }

    #[test]
    fn test_prefix_width_counts_wide_chars() {
        assert_eq!(prefix_width("日本語", 2), 4);
        assert_eq!(prefix_width("abc", 10), 3);
    }
}
