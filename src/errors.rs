//! Error types for component configuration and export

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UzenceError {
    #[error("Page size must be a positive integer, got {0}")]
    InvalidPageSize(usize),

    #[error("Column '{0}' is not part of the column set")]
    UnknownColumn(String),

    #[error("Column '{0}' is not sortable")]
    NotSortable(String),

    #[error("Duplicate column key '{0}'")]
    DuplicateColumn(String),

    #[error("Invalid input pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, UzenceError>;
