//! Status line for hosts: the latest message plus a bounded history

use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::ui::Styles;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusKind {
    fn icon(&self) -> &'static str {
        match self {
            StatusKind::Info => "ℹ",
            StatusKind::Success => "✓",
            StatusKind::Warning => "⚠",
            StatusKind::Error => "✗",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub timestamp: DateTime<Local>,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            timestamp: Local::now(),
        }
    }
}

pub struct StatusDisplay {
    current: Option<StatusMessage>,
    history: Vec<StatusMessage>,
    max_history: usize,
    show_timestamp: bool,
}

impl Default for StatusDisplay {
    fn default() -> Self {
        Self {
            current: None,
            history: Vec::new(),
            max_history: 50,
            show_timestamp: true,
        }
    }
}

impl StatusDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    pub fn without_timestamps(mut self) -> Self {
        self.show_timestamp = false;
        self
    }

    /// Replace the current message, archiving the previous one
    pub fn set(&mut self, message: StatusMessage) {
        self.archive_current();
        self.current = Some(message);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.set(StatusMessage::new(text, StatusKind::Info));
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.set(StatusMessage::new(text, StatusKind::Success));
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.set(StatusMessage::new(text, StatusKind::Warning));
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.set(StatusMessage::new(text, StatusKind::Error));
    }

    pub fn clear(&mut self) {
        self.archive_current();
    }

    fn archive_current(&mut self) {
        if let Some(current) = self.current.take() {
            self.history.push(current);
            if self.history.len() > self.max_history {
                self.history.remove(0);
            }
        }
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &[StatusMessage] {
        &self.history
    }

    fn format(&self, message: &StatusMessage) -> String {
        if self.show_timestamp {
            format!(
                "{} [{}] {}",
                message.kind.icon(),
                message.timestamp.format("%H:%M:%S"),
                message.text
            )
        } else {
            format!("{} {}", message.kind.icon(), message.text)
        }
    }

    /// Render the status box with a key hint on its bottom border
    pub fn render(&self, f: &mut Frame, area: Rect, hint: &str) {
        let line = match self.current {
            Some(ref message) => {
                let style = match message.kind {
                    StatusKind::Info => Styles::info(),
                    StatusKind::Success => Styles::success(),
                    StatusKind::Warning => Styles::warning(),
                    StatusKind::Error => Styles::error(),
                };
                Line::from(Span::styled(self.format(message), style))
            }
            None => Line::from(Span::styled("Ready", Styles::inactive())),
        };

        let block = Block::default()
            .title("Status")
            .title(
                Title::from(Span::styled(hint.to_string(), Styles::inactive()))
                    .position(Position::Bottom),
            )
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border());

        f.render_widget(Paragraph::new(line).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut status = StatusDisplay::new().with_history(2);
        status.info("one");
        status.success("two");
        status.warning("three");
        status.error("four");

        assert_eq!(status.current().map(|m| m.kind), Some(StatusKind::Error));
        let texts: Vec<&str> = status.history().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["two", "three"]);

        status.clear();
        assert!(status.current().is_none());
        assert_eq!(status.history().len(), 2);
    }

    #[test]
    fn test_format_without_timestamp() {
        let status = StatusDisplay::new().without_timestamps();
        let message = StatusMessage::new("Form submitted successfully!", StatusKind::Success);
        assert_eq!(status.format(&message), "✓ Form submitted successfully!");
    }
}
