//! Sign-up form built from controlled validated inputs

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info, warn};

use crate::components::input_field::{
    InputOutcome, InputType, ValidatedInput, ValidationRules,
};
use crate::models::Row;
use crate::traits::{Screen, ScreenAction};
use crate::ui::Styles;

const FIRST_NAME: usize = 0;
const LAST_NAME: usize = 1;
const EMAIL: usize = 2;
const PASSWORD: usize = 3;
const CONFIRM_PASSWORD: usize = 4;
const FIELD_COUNT: usize = 9;

/// Keys used when the submitted form is logged
const FIELD_KEYS: [&str; FIELD_COUNT] = [
    "firstName", "lastName", "email", "password", "confirmPassword", "phone", "website", "age", "bio",
];

/// Field indices per visual row
const ROWS: &[&[usize]] = &[&[0, 1], &[2], &[3, 4], &[5, 6], &[7], &[8]];

pub struct SignupScreen {
    fields: Vec<ValidatedInput>,
    /// Authoritative form values, pushed back into the controlled fields
    values: Vec<String>,
    focused: usize,
}

impl Default for SignupScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SignupScreen {
    pub fn new() -> Self {
        let fields = vec![
            ValidatedInput::controlled("First Name", "")
                .with_placeholder("Enter your first name")
                .required()
                .with_max_length(50),
            ValidatedInput::controlled("Last Name", "")
                .with_placeholder("Enter your last name")
                .required()
                .with_max_length(50),
            ValidatedInput::controlled("Email Address", "")
                .with_type(InputType::Email)
                .with_placeholder("Enter your email address")
                .with_auto_complete("email")
                .required()
                .with_helper_text("We'll use this to send you important updates"),
            ValidatedInput::controlled("Password", "")
                .with_type(InputType::Password)
                .with_placeholder("Enter your password")
                .with_auto_complete("new-password")
                .required()
                .with_min_length(8)
                .with_validation(ValidationRules::new().with_custom(password_strength)),
            ValidatedInput::controlled("Confirm Password", "")
                .with_type(InputType::Password)
                .with_placeholder("Confirm your password")
                .required(),
            ValidatedInput::controlled("Phone Number", "")
                .with_type(InputType::Tel)
                .with_placeholder("+1 (555) 123-4567")
                .with_helper_text("Optional: Include country code"),
            ValidatedInput::controlled("Website", "")
                .with_type(InputType::Url)
                .with_placeholder("https://your-website.com")
                .with_helper_text("Optional: Your personal or business website"),
            ValidatedInput::controlled("Age", "")
                .with_type(InputType::Number)
                .with_placeholder("Enter your age")
                .with_validation(ValidationRules::new().with_min(13.0).with_max(120.0))
                .with_helper_text("Must be 13 years or older"),
            ValidatedInput::controlled("Bio", "")
                .with_placeholder("Tell us about yourself...")
                .with_max_length(500)
                .with_helper_text("Optional: Share a brief description about yourself"),
        ];
        debug_assert_eq!(fields.len(), FIELD_COUNT);

        let mut screen = Self {
            fields,
            values: vec![String::new(); FIELD_COUNT],
            focused: 0,
        };
        screen.fields[0].focus();
        screen
    }

    pub fn value(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn field(&self, index: usize) -> Option<&ValidatedInput> {
        self.fields.get(index)
    }

    pub fn focused_index(&self) -> usize {
        self.focused
    }

    /// Submitted values keyed by field, without the password fields
    pub fn form_data(&self) -> Row {
        FIELD_KEYS
            .iter()
            .zip(&self.values)
            .enumerate()
            .filter(|(index, _)| *index != PASSWORD && *index != CONFIRM_PASSWORD)
            .map(|(_, (key, value))| (*key, value.as_str()))
            .collect()
    }

    fn move_focus(&mut self, forward: bool) {
        self.fields[self.focused].blur();
        self.focused = if forward {
            (self.focused + 1) % FIELD_COUNT
        } else {
            (self.focused + FIELD_COUNT - 1) % FIELD_COUNT
        };
        self.fields[self.focused].focus();
    }

    /// Store an edited value and clear the host error for that field
    fn accept_change(&mut self, index: usize, value: String) {
        self.fields[index].set_external_error(None);
        self.fields[index].set_controlled_value(&value);
        self.values[index] = value;
    }

    /// Host-side checks done before the fields' own rules
    fn host_errors(&self) -> Vec<(usize, &'static str)> {
        let mut errors = Vec::new();
        if self.values[FIRST_NAME].is_empty() {
            errors.push((FIRST_NAME, "First name is required"));
        }
        if self.values[LAST_NAME].is_empty() {
            errors.push((LAST_NAME, "Last name is required"));
        }
        if self.values[EMAIL].is_empty() {
            errors.push((EMAIL, "Email is required"));
        }
        if self.values[PASSWORD].is_empty() {
            errors.push((PASSWORD, "Password is required"));
        }
        if self.values[PASSWORD] != self.values[CONFIRM_PASSWORD] {
            errors.push((CONFIRM_PASSWORD, "Passwords do not match"));
        }
        errors
    }

    /// Validate everything and report the outcome
    pub fn submit(&mut self) -> ScreenAction {
        let errors = self.host_errors();
        for field in &mut self.fields {
            field.set_external_error(None);
        }
        for &(index, message) in &errors {
            self.fields[index].set_external_error(Some(message.to_string()));
        }
        if !errors.is_empty() {
            debug!("Form rejected with {} host errors", errors.len());
            return ScreenAction::SetError(format!("Please fix {} field(s)", errors.len()));
        }

        let invalid = self
            .fields
            .iter_mut()
            .map(|field| field.check_validity())
            .filter(|valid| !valid)
            .count();
        if invalid > 0 {
            return ScreenAction::SetError(format!("Please fix {} field(s)", invalid));
        }

        match serde_json::to_string(&self.form_data()) {
            Ok(data) => info!("Form submitted: {}", data),
            Err(e) => warn!("Form submitted but could not be serialized: {}", e),
        }
        ScreenAction::SetStatus("Form submitted successfully!".to_string())
    }
}

fn password_strength(value: &str) -> Option<String> {
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    if has_lower && has_upper && has_digit {
        None
    } else {
        Some("Password must contain uppercase, lowercase, and number".to_string())
    }
}

impl Screen for SignupScreen {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Line::from(Span::styled("Sign Up", Styles::title())))
            .borders(Borders::ALL)
            .border_style(Styles::active_border());
        let inner = block.inner(area);
        f.render_widget(block, area);

        let field_height = self.fields[0].height();
        let mut constraints: Vec<Constraint> =
            ROWS.iter().map(|_| Constraint::Length(field_height)).collect();
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (row_index, indices) in ROWS.iter().enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, indices.len() as u32); indices.len()])
                .split(rows[row_index]);
            for (cell, &index) in cells.iter().zip(indices.iter()) {
                self.fields[index].render(f, *cell);
            }
        }

        let hint = Paragraph::new(Line::from(vec![
            Span::styled("Enter", Styles::info()),
            Span::raw(": Submit Form  "),
            Span::styled("Tab/Shift+Tab", Styles::info()),
            Span::raw(": Next/Previous field"),
        ]));
        f.render_widget(hint, rows[ROWS.len()]);
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<ScreenAction> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            KeyCode::Enter => return Ok(self.submit()),
            _ => {
                let index = self.focused;
                if let InputOutcome::Changed(value) = self.fields[index].handle_key_event(key) {
                    self.accept_change(index, value);
                }
            }
        }
        Ok(ScreenAction::None)
    }

    fn help_text(&self) -> &'static str {
        "Sign Up Form:\n\
        Tab / ↓ - Next field\n\
        Shift+Tab / ↑ - Previous field\n\
        ←/→ Home/End - Move cursor\n\
        Backspace/Delete - Edit\n\
        Ctrl+U - Clear field\n\
        Ctrl+R / F3 - Show/hide password\n\
        Enter - Submit form"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_into(screen: &mut SignupScreen, index: usize, text: &str) {
        while screen.focused_index() != index {
            screen.handle_key_event(key(KeyCode::Tab)).unwrap();
        }
        for c in text.chars() {
            screen.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_typing_updates_host_value() {
        let mut screen = SignupScreen::new();
        type_into(&mut screen, FIRST_NAME, "Ada");
        assert_eq!(screen.value(FIRST_NAME), "Ada");
        assert_eq!(screen.field(FIRST_NAME).map(|f| f.value()), Some("Ada"));
    }

    #[test]
    fn test_empty_submit_sets_host_errors() {
        let mut screen = SignupScreen::new();
        let action = screen.submit();
        assert_eq!(action, ScreenAction::SetError("Please fix 4 field(s)".to_string()));
        assert_eq!(
            screen.field(FIRST_NAME).and_then(|f| f.error_message()),
            Some("First name is required".to_string())
        );
        assert_eq!(screen.field(CONFIRM_PASSWORD).and_then(|f| f.error_message()), None);
    }

    #[test]
    fn test_typing_clears_host_error() {
        let mut screen = SignupScreen::new();
        screen.submit();
        type_into(&mut screen, EMAIL, "a");
        assert_ne!(
            screen.field(EMAIL).and_then(|f| f.error_message()),
            Some("Email is required".to_string())
        );
    }

    #[test]
    fn test_password_mismatch_and_strength() {
        let mut screen = SignupScreen::new();
        type_into(&mut screen, FIRST_NAME, "Ada");
        type_into(&mut screen, LAST_NAME, "Lovelace");
        type_into(&mut screen, EMAIL, "ada@example.com");
        type_into(&mut screen, PASSWORD, "Ab3");
        assert_eq!(
            screen.field(PASSWORD).and_then(|f| f.error_message()),
            Some("Minimum 8 characters required".to_string())
        );

        let action = screen.submit();
        assert_eq!(action, ScreenAction::SetError("Please fix 1 field(s)".to_string()));
        assert_eq!(
            screen.field(CONFIRM_PASSWORD).and_then(|f| f.error_message()),
            Some("Passwords do not match".to_string())
        );
    }

    #[test]
    fn test_successful_submit() {
        let mut screen = SignupScreen::new();
        type_into(&mut screen, FIRST_NAME, "Ada");
        type_into(&mut screen, LAST_NAME, "Lovelace");
        type_into(&mut screen, EMAIL, "ada@example.com");
        type_into(&mut screen, PASSWORD, "Secret123");
        type_into(&mut screen, CONFIRM_PASSWORD, "Secret123");

        assert_eq!(
            screen.submit(),
            ScreenAction::SetStatus("Form submitted successfully!".to_string())
        );

        let data = screen.form_data();
        assert_eq!(data.text("firstName"), "Ada");
        assert_eq!(data.text("email"), "ada@example.com");
        assert!(data.get("password").is_none());
        assert_eq!(data.len(), 7);
    }

    #[test]
    fn test_invalid_optional_field_blocks_submit() {
        let mut screen = SignupScreen::new();
        type_into(&mut screen, FIRST_NAME, "Ada");
        type_into(&mut screen, LAST_NAME, "Lovelace");
        type_into(&mut screen, EMAIL, "ada@example.com");
        type_into(&mut screen, PASSWORD, "Secret123");
        type_into(&mut screen, CONFIRM_PASSWORD, "Secret123");
        type_into(&mut screen, 7, "9");

        assert_eq!(
            screen.submit(),
            ScreenAction::SetError("Please fix 1 field(s)".to_string())
        );
        assert_eq!(
            screen.field(7).and_then(|f| f.error_message()),
            Some("Value must be at least 13".to_string())
        );
    }
}
