//! Validation rules for input fields
//!
//! Rules are evaluated in a fixed order and the first failure wins:
//! required, minimum length, maximum length, email shape, URL shape,
//! numeric minimum, numeric maximum, then the custom rule.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::warn;

use crate::errors::{Result, UzenceError};
use crate::models::format_number;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should compile"));

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://.+\..+").expect("url regex should compile"));

/// Kind of value an input field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Email,
    Password,
    Number,
    Tel,
    Url,
    Search,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Email => "email",
            InputType::Password => "password",
            InputType::Number => "number",
            InputType::Tel => "tel",
            InputType::Url => "url",
            InputType::Search => "search",
        }
    }
}

impl FromStr for InputType {
    type Err = UzenceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(InputType::Text),
            "email" => Ok(InputType::Email),
            "password" => Ok(InputType::Password),
            "number" => Ok(InputType::Number),
            "tel" => Ok(InputType::Tel),
            "url" => Ok(InputType::Url),
            "search" => Ok(InputType::Search),
            other => Err(UzenceError::Config(format!(
                "Unsupported input type: {}. Supported types: text, email, password, number, tel, url, search",
                other
            ))),
        }
    }
}

/// A failed validation rule. `Display` yields the message shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,

    #[error("Minimum {0} characters required")]
    TooShort(usize),

    #[error("Maximum {0} characters allowed")]
    TooLong(usize),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid URL")]
    InvalidUrl,

    #[error("Value must be at least {}", format_number(*.0))]
    BelowMinimum(f64),

    #[error("Value must be no more than {}", format_number(*.0))]
    AboveMaximum(f64),

    #[error("{0}")]
    Custom(String),

    #[error("Please match the requested format")]
    PatternMismatch,
}

/// Custom rule: returns `Some(message)` when the value is rejected
pub type CustomRule = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Numeric bounds and an optional custom rule
#[derive(Clone, Default)]
pub struct ValidationRules {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub custom: Option<CustomRule>,
}

impl fmt::Debug for ValidationRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRules")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl ValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_custom<F>(mut self, rule: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(rule));
        self
    }
}

/// Complete rule set for one field
#[derive(Debug, Clone, Default)]
pub struct FieldRules {
    pub input_type: InputType,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Native format constraint, checked only by [`FieldRules::check_validity`]
    pub pattern: Option<String>,
    pub validation: ValidationRules,
}

impl FieldRules {
    /// Run the live rule chain against a value.
    ///
    /// An empty, optional value passes without being considered valid;
    /// callers decide validity from `value.is_empty()`.
    pub fn validate(&self, value: &str) -> std::result::Result<(), ValidationError> {
        if value.is_empty() {
            return if self.required {
                Err(ValidationError::Required)
            } else {
                Ok(())
            };
        }

        let length = value.chars().count();

        if let Some(min_length) = self.min_length {
            if length < min_length {
                return Err(ValidationError::TooShort(min_length));
            }
        }

        if let Some(max_length) = self.max_length {
            if length > max_length {
                return Err(ValidationError::TooLong(max_length));
            }
        }

        if self.input_type == InputType::Email && !EMAIL_REGEX.is_match(value) {
            return Err(ValidationError::InvalidEmail);
        }

        if self.input_type == InputType::Url && !URL_REGEX.is_match(value) {
            return Err(ValidationError::InvalidUrl);
        }

        // Unparsable input fails whichever bound is being checked
        let number = value.trim().parse::<f64>().ok().filter(|n| !n.is_nan());

        if let Some(min) = self.validation.min {
            if number.map_or(true, |n| n < min) {
                return Err(ValidationError::BelowMinimum(min));
            }
        }

        if let Some(max) = self.validation.max {
            if number.map_or(true, |n| n > max) {
                return Err(ValidationError::AboveMaximum(max));
            }
        }

        if let Some(ref custom) = self.validation.custom {
            if let Some(message) = custom(value) {
                return Err(ValidationError::Custom(message));
            }
        }

        Ok(())
    }

    /// Compile the native pattern, anchored to the whole value.
    pub fn compiled_pattern(&self) -> Result<Option<Regex>> {
        match self.pattern {
            Some(ref pattern) => Ok(Some(Regex::new(&format!("^(?:{})$", pattern))?)),
            None => Ok(None),
        }
    }

    /// Rule chain plus the native pattern constraint, as checked on submit.
    ///
    /// An invalid pattern is ignored, the way a browser ignores it.
    pub fn check_validity(&self, value: &str) -> std::result::Result<(), ValidationError> {
        self.validate(value)?;

        if value.is_empty() {
            return Ok(());
        }

        match self.compiled_pattern() {
            Ok(Some(regex)) if !regex.is_match(value) => Err(ValidationError::PatternMismatch),
            Ok(_) => Ok(()),
            Err(e) => {
                warn!("Ignoring input pattern: {}", e);
                Ok(())
            }
        }
    }
}
