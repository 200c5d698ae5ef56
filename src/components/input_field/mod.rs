//! Validated input field component
//!
//! A single-line text input with layered validation, a visual state
//! (neutral, focused, valid, error) and optional change/blur/focus
//! callbacks. The value is either owned by the field (uncontrolled) or by
//! the host (controlled); the mode is fixed at construction.

pub mod validation;

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Paragraph},
    Frame,
};
use tracing::debug;

use crate::ui::{cursor_x, prefix_width, Styles};

pub use validation::{FieldRules, InputType, ValidationError, ValidationRules};

/// Callback receiving the field's current string value
pub type ValueCallback = Box<dyn FnMut(&str)>;

/// Who owns the authoritative value
#[derive(Debug, Clone, PartialEq)]
pub enum ValueMode {
    /// The host owns the value and pushes it back after every change
    Controlled(String),
    /// The field owns the value, seeded with a default
    Uncontrolled(String),
}

/// Visual state, in decreasing precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    Error,
    Valid,
    Focused,
    Neutral,
}

/// Result of feeding a key event to the field
#[derive(Debug, Clone, PartialEq)]
pub enum InputOutcome {
    /// The key was not meant for this field
    Ignored,
    /// The key was consumed without changing the value
    Handled,
    /// The value changed (or, when controlled, a change was proposed)
    Changed(String),
}

pub struct ValidatedInput {
    pub label: String,
    pub placeholder: String,
    pub helper_text: Option<String>,
    pub auto_complete: Option<String>,
    pub disabled: bool,
    rules: FieldRules,
    mode: ValueMode,
    default_value: String,
    external_error: Option<String>,
    internal_error: Option<ValidationError>,
    is_valid: bool,
    is_focused: bool,
    is_password_revealed: bool,
    /// Set by an edit or a blur; an untouched empty field shows no error
    is_touched: bool,
    cursor_position: usize,
    /// Value and cursor proposed to the host by the last controlled edit
    pending_edit: Option<(String, usize)>,
    on_change: Option<ValueCallback>,
    on_blur: Option<ValueCallback>,
    on_focus: Option<ValueCallback>,
}

impl fmt::Debug for ValidatedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedInput")
            .field("label", &self.label)
            .field("mode", &self.mode)
            .field("rules", &self.rules)
            .field("external_error", &self.external_error)
            .field("internal_error", &self.internal_error)
            .field("is_valid", &self.is_valid)
            .field("is_focused", &self.is_focused)
            .finish_non_exhaustive()
    }
}

impl ValidatedInput {
    pub fn new(label: &str, mode: ValueMode) -> Self {
        let default_value = match mode {
            ValueMode::Uncontrolled(ref initial) => initial.clone(),
            ValueMode::Controlled(_) => String::new(),
        };
        let cursor_position = match mode {
            ValueMode::Controlled(ref v) | ValueMode::Uncontrolled(ref v) => v.chars().count(),
        };

        let mut field = Self {
            label: label.to_string(),
            placeholder: String::new(),
            helper_text: None,
            auto_complete: None,
            disabled: false,
            rules: FieldRules::default(),
            mode,
            default_value,
            external_error: None,
            internal_error: None,
            is_valid: false,
            is_focused: false,
            is_password_revealed: false,
            is_touched: false,
            cursor_position,
            pending_edit: None,
            on_change: None,
            on_blur: None,
            on_focus: None,
        };
        field.refresh();
        field
    }

    /// Field owning its value, starting empty
    pub fn uncontrolled(label: &str) -> Self {
        Self::new(label, ValueMode::Uncontrolled(String::new()))
    }

    /// Field whose value is owned by the host
    pub fn controlled(label: &str, value: &str) -> Self {
        Self::new(label, ValueMode::Controlled(value.to_string()))
    }

    pub fn with_type(mut self, input_type: InputType) -> Self {
        self.rules.input_type = input_type;
        self.refresh();
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_helper_text(mut self, helper_text: &str) -> Self {
        self.helper_text = Some(helper_text.to_string());
        self
    }

    pub fn with_auto_complete(mut self, auto_complete: &str) -> Self {
        self.auto_complete = Some(auto_complete.to_string());
        self
    }

    pub fn required(mut self) -> Self {
        self.rules.required = true;
        self.refresh();
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.rules.min_length = Some(min_length);
        self.refresh();
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.rules.max_length = Some(max_length);
        self.refresh();
        self
    }

    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.rules.pattern = Some(pattern.to_string());
        self
    }

    pub fn with_validation(mut self, validation: ValidationRules) -> Self {
        self.rules.validation = validation;
        self.refresh();
        self
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.external_error = error;
        self
    }

    pub fn on_change<F: FnMut(&str) + 'static>(mut self, callback: F) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn on_blur<F: FnMut(&str) + 'static>(mut self, callback: F) -> Self {
        self.on_blur = Some(Box::new(callback));
        self
    }

    pub fn on_focus<F: FnMut(&str) + 'static>(mut self, callback: F) -> Self {
        self.on_focus = Some(Box::new(callback));
        self
    }

    pub fn rules(&self) -> &FieldRules {
        &self.rules
    }

    pub fn input_type(&self) -> InputType {
        self.rules.input_type
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self.mode, ValueMode::Controlled(_))
    }

    /// Current authoritative value
    pub fn value(&self) -> &str {
        match self.mode {
            ValueMode::Controlled(ref v) | ValueMode::Uncontrolled(ref v) => v,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value().is_empty()
    }

    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    pub fn is_password_revealed(&self) -> bool {
        self.is_password_revealed
    }

    /// True when the last validation passed on a non-empty value
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor()
    }

    /// Host-supplied error; always shown in place of the field's own error
    pub fn set_external_error(&mut self, error: Option<String>) {
        self.external_error = error;
    }

    pub fn internal_error(&self) -> Option<&ValidationError> {
        self.internal_error.as_ref()
    }

    /// The single message to display, external error first
    pub fn error_message(&self) -> Option<String> {
        match self.external_error {
            Some(ref e) if !e.is_empty() => Some(e.clone()),
            _ => self.internal_error.as_ref().map(|e| e.to_string()),
        }
    }

    pub fn visual_state(&self) -> VisualState {
        if self.error_message().is_some() {
            VisualState::Error
        } else if self.is_valid {
            VisualState::Valid
        } else if self.is_focused {
            VisualState::Focused
        } else {
            VisualState::Neutral
        }
    }

    /// Push the host's authoritative value into a controlled field.
    pub fn set_controlled_value(&mut self, value: &str) {
        match self.mode {
            ValueMode::Controlled(ref mut current) => {
                *current = value.to_string();
            }
            ValueMode::Uncontrolled(_) => {
                debug!("Ignoring controlled value for uncontrolled field '{}'", self.label);
                return;
            }
        }
        let length = value.chars().count();
        self.cursor_position = match self.pending_edit.take() {
            Some((proposed, cursor)) if proposed == value => cursor,
            _ => self.cursor_position,
        }
        .min(length);
        self.refresh();
    }

    /// Restore the initial state. Controlled fields keep the host's value.
    pub fn reset(&mut self) {
        if let ValueMode::Uncontrolled(ref mut v) = self.mode {
            *v = self.default_value.clone();
        }
        self.internal_error = None;
        self.is_valid = false;
        self.is_password_revealed = false;
        self.is_touched = false;
        self.pending_edit = None;
        self.cursor_position = self.value().chars().count();
        self.refresh();
    }

    /// Revalidate after the value or the rules change from outside. An
    /// empty value is never valid, and shows no error until touched.
    fn refresh(&mut self) {
        if self.value().is_empty() && !self.is_touched {
            self.internal_error = None;
            self.is_valid = false;
        } else {
            let value = self.value().to_string();
            self.run_validation(&value);
        }
    }

    fn run_validation(&mut self, value: &str) {
        match self.rules.validate(value) {
            Ok(()) => {
                self.internal_error = None;
                self.is_valid = !value.is_empty();
            }
            Err(e) => {
                self.internal_error = Some(e);
                self.is_valid = false;
            }
        }
    }

    /// Full check including the native pattern constraint, as on form submit.
    pub fn check_validity(&mut self) -> bool {
        self.is_touched = true;
        let value = self.value().to_string();
        match self.rules.check_validity(&value) {
            Ok(()) => {
                self.internal_error = None;
                self.is_valid = !value.is_empty();
                true
            }
            Err(e) => {
                self.internal_error = Some(e);
                self.is_valid = false;
                false
            }
        }
    }

    pub fn focus(&mut self) {
        if self.disabled || self.is_focused {
            return;
        }
        self.is_focused = true;
        let value = self.value().to_string();
        if let Some(ref mut callback) = self.on_focus {
            callback(&value);
        }
    }

    pub fn blur(&mut self) {
        if !self.is_focused {
            return;
        }
        self.is_focused = false;
        self.is_touched = true;
        let value = self.value().to_string();
        self.run_validation(&value);
        if let Some(ref mut callback) = self.on_blur {
            callback(&value);
        }
    }

    /// Swap masked and plain rendering of a password. Never validates or
    /// notifies.
    pub fn toggle_password_visibility(&mut self) -> bool {
        if self.rules.input_type != InputType::Password {
            return false;
        }
        self.is_password_revealed = !self.is_password_revealed;
        true
    }

    /// Apply an edit producing `new_value` with the cursor at `new_cursor`.
    fn apply_edit(&mut self, new_value: String, new_cursor: usize) -> InputOutcome {
        if self.disabled {
            return InputOutcome::Ignored;
        }

        // max_length is also the native typing limit
        if let Some(max_length) = self.rules.max_length {
            let new_len = new_value.chars().count();
            if new_len > max_length && new_len > self.value().chars().count() {
                return InputOutcome::Handled;
            }
        }

        // A controlled field moves its cursor once the host accepts the value
        match self.mode {
            ValueMode::Uncontrolled(ref mut v) => {
                *v = new_value.clone();
                self.cursor_position = new_cursor;
            }
            ValueMode::Controlled(_) => {
                self.pending_edit = Some((new_value.clone(), new_cursor));
            }
        }
        self.is_touched = true;

        self.run_validation(&new_value);
        if let Some(ref mut callback) = self.on_change {
            callback(&new_value);
        }

        InputOutcome::Changed(new_value)
    }

    /// Cursor clamped to the current value
    fn cursor(&self) -> usize {
        self.cursor_position.min(self.value().chars().count())
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value()
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value().len())
    }

    pub fn insert_char(&mut self, c: char) -> InputOutcome {
        let cursor = self.cursor();
        let mut new_value = self.value().to_string();
        new_value.insert(self.byte_index(cursor), c);
        self.apply_edit(new_value, cursor + 1)
    }

    pub fn delete_char(&mut self) -> InputOutcome {
        let cursor = self.cursor();
        if cursor == 0 {
            return InputOutcome::Handled;
        }
        let mut new_value = self.value().to_string();
        new_value.remove(self.byte_index(cursor - 1));
        self.apply_edit(new_value, cursor - 1)
    }

    pub fn delete_char_forward(&mut self) -> InputOutcome {
        let cursor = self.cursor();
        if cursor >= self.value().chars().count() {
            return InputOutcome::Handled;
        }
        let mut new_value = self.value().to_string();
        new_value.remove(self.byte_index(cursor));
        self.apply_edit(new_value, cursor)
    }

    pub fn clear(&mut self) -> InputOutcome {
        self.apply_edit(String::new(), 0)
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor().saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let cursor = self.cursor();
        if cursor < self.value().chars().count() {
            self.cursor_position = cursor + 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.value().chars().count();
    }

    /// Handle keyboard input while the field has focus
    pub fn handle_key_event(&mut self, key: KeyEvent) -> InputOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('r') if ctrl => {
                if self.toggle_password_visibility() {
                    InputOutcome::Handled
                } else {
                    InputOutcome::Ignored
                }
            }
            KeyCode::F(3) => {
                if self.toggle_password_visibility() {
                    InputOutcome::Handled
                } else {
                    InputOutcome::Ignored
                }
            }
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char(_) if ctrl => InputOutcome::Ignored,
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Delete => self.delete_char_forward(),
            KeyCode::Left => {
                self.move_cursor_left();
                InputOutcome::Handled
            }
            KeyCode::Right => {
                self.move_cursor_right();
                InputOutcome::Handled
            }
            KeyCode::Home => {
                self.move_cursor_to_start();
                InputOutcome::Handled
            }
            KeyCode::End => {
                self.move_cursor_to_end();
                InputOutcome::Handled
            }
            _ => InputOutcome::Ignored,
        }
    }

    /// Rows needed by [`ValidatedInput::render`]: the bordered box plus one
    /// message line.
    pub fn height(&self) -> u16 {
        4
    }

    fn display_value(&self) -> String {
        if self.rules.input_type == InputType::Password && !self.is_password_revealed {
            "•".repeat(self.value().chars().count())
        } else {
            self.value().to_string()
        }
    }

    /// Render the input field
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(1)])
            .split(area);

        let state = self.visual_state();
        let mut border_style = match state {
            VisualState::Error => Styles::error(),
            VisualState::Valid => Styles::success(),
            VisualState::Focused => Styles::focused_border(),
            VisualState::Neutral => Styles::inactive_border(),
        };
        if self.disabled {
            border_style = border_style.add_modifier(Modifier::DIM);
        }

        let mut title = vec![Span::styled(self.label.clone(), Styles::header())];
        if self.rules.required {
            title.push(Span::styled(" *", Styles::error()));
        }

        let mut indicators = Vec::new();
        if self.rules.input_type == InputType::Password {
            let toggle = if self.is_password_revealed { "hide" } else { "show" };
            indicators.push(Span::styled(format!("[^R {}]", toggle), Styles::inactive()));
        }
        match state {
            VisualState::Error => indicators.push(Span::styled(" ✗", Styles::error())),
            VisualState::Valid => indicators.push(Span::styled(" ✓", Styles::success())),
            _ => {}
        }

        let block = Block::default()
            .title(Line::from(title))
            .title(Title::from(Line::from(indicators)).alignment(Alignment::Right))
            .borders(Borders::ALL)
            .border_style(border_style);

        let (text, text_style) = if self.value().is_empty() && !self.placeholder.is_empty() {
            (self.placeholder.clone(), Styles::inactive())
        } else {
            (self.display_value(), Styles::default())
        };
        let text_style = if self.disabled { Styles::disabled() } else { text_style };

        let paragraph = Paragraph::new(text).style(text_style).block(block);
        f.render_widget(paragraph, chunks[0]);

        self.render_message_line(f, chunks[1]);

        // Render cursor if focused
        if self.is_focused && !self.disabled {
            let shown = self.display_value();
            let x = cursor_x(chunks[0].x, prefix_width(&shown, self.cursor()));
            if x < chunks[0].right().saturating_sub(1) {
                f.set_cursor(x, chunks[0].y + 1);
            }
        }
    }

    fn render_message_line(&self, f: &mut Frame, area: Rect) {
        let message = if let Some(error) = self.error_message() {
            Line::from(vec![
                Span::styled("✗ ", Styles::error()),
                Span::styled(error, Styles::error()),
            ])
        } else if let Some(ref helper) = self.helper_text {
            Line::from(Span::styled(format!("  {}", helper), Styles::inactive()))
        } else {
            Line::default()
        };
        f.render_widget(Paragraph::new(message), area);

        if let Some(max_length) = self.rules.max_length {
            let length = self.value().chars().count();
            // Highlight once the value is within 10% of the limit
            let style = if length as f64 > max_length as f64 * 0.9 {
                Styles::error()
            } else {
                Style::default().fg(ratatui::style::Color::DarkGray)
            };
            let counter = Paragraph::new(Span::styled(format!("{}/{}", length, max_length), style))
                .alignment(Alignment::Right);
            f.render_widget(counter, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn type_str(field: &mut ValidatedInput, s: &str) {
        for c in s.chars() {
            field.insert_char(c);
        }
    }

    #[test]
    fn test_uncontrolled_typing_updates_value_and_validates() {
        let mut field = ValidatedInput::uncontrolled("Email")
            .with_type(InputType::Email)
            .required();
        field.focus();
        type_str(&mut field, "not-an-email");
        assert_eq!(field.value(), "not-an-email");
        assert_eq!(
            field.error_message().as_deref(),
            Some("Please enter a valid email address")
        );
        assert_eq!(field.visual_state(), VisualState::Error);

        field.clear();
        type_str(&mut field, "john@example.com");
        assert!(field.is_valid());
        assert_eq!(field.error_message(), None);
        assert_eq!(field.visual_state(), VisualState::Valid);
    }

    #[test]
    fn test_required_field_blurred_empty_shows_error() {
        let mut field = ValidatedInput::uncontrolled("First Name").required();
        assert_eq!(field.visual_state(), VisualState::Neutral);
        field.focus();
        assert_eq!(field.visual_state(), VisualState::Focused);
        field.blur();
        assert_eq!(field.error_message().as_deref(), Some("This field is required"));
    }

    #[test]
    fn test_empty_optional_field_is_neutral() {
        let mut field = ValidatedInput::uncontrolled("Website").with_type(InputType::Url);
        field.focus();
        field.blur();
        assert_eq!(field.error_message(), None);
        assert!(!field.is_valid());
        assert_eq!(field.visual_state(), VisualState::Neutral);
    }

    #[test]
    fn test_password_too_short_before_custom_rule() {
        let field = ValidatedInput::controlled("Password", "Ab3")
            .with_type(InputType::Password)
            .with_min_length(8)
            .with_validation(
                ValidationRules::new().with_custom(|_| Some("complexity".to_string())),
            );
        assert_eq!(
            field.error_message().as_deref(),
            Some("Minimum 8 characters required")
        );
    }

    #[test]
    fn test_external_error_masks_internal_error() {
        let mut field = ValidatedInput::controlled("Email", "bad")
            .with_type(InputType::Email)
            .with_error(Some("Email is required".to_string()));
        assert_eq!(field.error_message().as_deref(), Some("Email is required"));

        field.set_external_error(Some(String::new()));
        assert_eq!(
            field.error_message().as_deref(),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn test_controlled_field_does_not_own_value() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        let mut field = ValidatedInput::controlled("Name", "Jo")
            .on_change(move |v| sink.borrow_mut().push(v.to_string()));
        assert!(field.is_controlled());

        field.move_cursor_to_end();
        let outcome = field.insert_char('e');
        assert_eq!(outcome, InputOutcome::Changed("Joe".to_string()));
        assert_eq!(field.value(), "Jo");
        assert_eq!(changes.borrow().as_slice(), ["Joe".to_string()]);

        field.set_controlled_value("Joe");
        assert_eq!(field.value(), "Joe");
        assert!(field.is_valid());
    }

    #[test]
    fn test_set_controlled_value_ignored_when_uncontrolled() {
        let mut field = ValidatedInput::new("Bio", ValueMode::Uncontrolled("hello".to_string()));
        field.set_controlled_value("other");
        assert_eq!(field.value(), "hello");
    }

    #[test]
    fn test_focus_and_blur_callbacks_receive_value() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let on_focus = events.clone();
        let on_blur = events.clone();
        let mut field = ValidatedInput::new("Age", ValueMode::Uncontrolled("42".to_string()))
            .on_focus(move |v| on_focus.borrow_mut().push(format!("focus:{}", v)))
            .on_blur(move |v| on_blur.borrow_mut().push(format!("blur:{}", v)));

        field.focus();
        field.insert_char('0');
        field.blur();
        assert_eq!(events.borrow().as_slice(), ["focus:42", "blur:420"]);
    }

    #[test]
    fn test_max_length_limits_typing() {
        let changes = Rc::new(RefCell::new(0));
        let counter = changes.clone();
        let mut field = ValidatedInput::uncontrolled("Code")
            .with_max_length(3)
            .on_change(move |_| *counter.borrow_mut() += 1);
        type_str(&mut field, "abcd");
        assert_eq!(field.value(), "abc");
        assert_eq!(*changes.borrow(), 3);
    }

    #[test]
    fn test_too_long_reported_for_external_values() {
        let field = ValidatedInput::controlled("Name", "abcdef").with_max_length(3);
        assert_eq!(
            field.error_message().as_deref(),
            Some("Maximum 3 characters allowed")
        );
    }

    #[test]
    fn test_password_toggle_does_not_notify() {
        let changes = Rc::new(RefCell::new(0));
        let counter = changes.clone();
        let mut field = ValidatedInput::new("Password", ValueMode::Uncontrolled("secret".into()))
            .with_type(InputType::Password)
            .on_change(move |_| *counter.borrow_mut() += 1);

        assert_eq!(field.display_value(), "••••••");
        assert!(field.toggle_password_visibility());
        assert_eq!(field.display_value(), "secret");
        assert_eq!(field.value(), "secret");
        assert_eq!(*changes.borrow(), 0);

        let mut text = ValidatedInput::uncontrolled("Name");
        assert!(!text.toggle_password_visibility());
    }

    #[test]
    fn test_disabled_field_ignores_edits_but_keeps_error() {
        let mut field = ValidatedInput::controlled("Email", "bad")
            .with_type(InputType::Email)
            .with_disabled(true);
        assert_eq!(field.insert_char('x'), InputOutcome::Ignored);
        field.focus();
        assert!(!field.is_focused());
        assert_eq!(field.visual_state(), VisualState::Error);
    }

    #[test]
    fn test_cursor_editing_with_multibyte_chars() {
        let mut field = ValidatedInput::new("Name", ValueMode::Uncontrolled("日本".to_string()));
        field.move_cursor_left();
        field.insert_char('x');
        assert_eq!(field.value(), "日x本");
        field.delete_char();
        field.move_cursor_to_start();
        field.delete_char_forward();
        assert_eq!(field.value(), "本");
    }

    #[test]
    fn test_reset_restores_default() {
        let mut field = ValidatedInput::new("Bio", ValueMode::Uncontrolled("hi".to_string()))
            .with_min_length(5);
        assert!(field.error_message().is_some());
        type_str(&mut field, " there");
        assert!(field.is_valid());
        field.reset();
        assert_eq!(field.value(), "hi");
        assert_eq!(
            field.error_message().as_deref(),
            Some("Minimum 5 characters required")
        );
    }

    #[test]
    fn test_check_validity_applies_pattern() {
        let mut field = ValidatedInput::controlled("Phone", "call me")
            .with_type(InputType::Tel)
            .with_pattern(r"[0-9+() -]+");
        assert!(field.is_valid());
        assert!(!field.check_validity());
        assert_eq!(
            field.error_message().as_deref(),
            Some("Please match the requested format")
        );
    }

    #[test]
    fn test_controlled_edit_rejected_by_host() {
        let mut field = ValidatedInput::controlled("Name", "");
        assert_eq!(field.insert_char('a'), InputOutcome::Changed("a".to_string()));
        assert_eq!(field.value(), "");
        assert_eq!(field.cursor_position(), 0);

        assert_eq!(field.delete_char(), InputOutcome::Handled);
        assert_eq!(field.delete_char_forward(), InputOutcome::Handled);
        field.move_cursor_right();
        assert_eq!(field.cursor_position(), 0);
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_controlled_cursor_follows_accepted_value() {
        let mut field = ValidatedInput::controlled("Name", "ab");
        field.move_cursor_to_start();
        if let InputOutcome::Changed(value) = field.insert_char('x') {
            field.set_controlled_value(&value);
        }
        assert_eq!(field.value(), "xab");
        assert_eq!(field.cursor_position(), 1);

        // The host pushes something else, e.g. a normalised value
        field.insert_char('y');
        field.set_controlled_value("z");
        assert_eq!(field.cursor_position(), 1);
        field.delete_char();
        assert_eq!(field.cursor_position(), 1);
    }

    #[test]
    fn test_controlled_value_emptied_by_host() {
        let mut field = ValidatedInput::controlled("Name", "John");
        assert!(field.is_valid());
        assert_eq!(field.visual_state(), VisualState::Valid);

        field.set_controlled_value("");
        assert!(!field.is_valid());
        assert_eq!(field.error_message(), None);
        assert_eq!(field.visual_state(), VisualState::Neutral);
    }

    #[test]
    fn test_touched_required_field_emptied_by_host() {
        let mut field = ValidatedInput::controlled("Name", "Jo").required();
        field.focus();
        field.blur();
        assert!(field.is_valid());

        field.set_controlled_value("");
        assert!(!field.is_valid());
        assert_eq!(field.error_message().as_deref(), Some("This field is required"));
    }

    #[test]
    fn test_render_cursor_with_very_long_value() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut field = ValidatedInput::new("Notes", ValueMode::Uncontrolled("x".repeat(70_000)));
        field.focus();
        let mut terminal = Terminal::new(TestBackend::new(40, 4)).unwrap();
        terminal.draw(|f| field.render(f, f.size())).unwrap();
    }

    #[test]
    fn test_key_events() {
        let mut field = ValidatedInput::uncontrolled("Name");
        let outcome = field.handle_key_event(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        assert_eq!(outcome, InputOutcome::Changed("a".to_string()));
        let outcome = field.handle_key_event(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(outcome, InputOutcome::Changed(String::new()));
        let outcome = field.handle_key_event(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        assert_eq!(outcome, InputOutcome::Ignored);
    }

    #[test]
    fn test_render_shows_label_and_error() {
        use ratatui::{backend::TestBackend, Terminal};

        let field = ValidatedInput::controlled("Email", "bad")
            .with_type(InputType::Email)
            .required();
        let mut terminal = Terminal::new(TestBackend::new(50, 4)).unwrap();
        terminal.draw(|f| field.render(f, f.size())).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Email *"));
        assert!(text.contains("Please enter a valid email address"));
    }
}
