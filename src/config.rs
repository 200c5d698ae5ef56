//! Centralized configuration management for uzence

use std::path::PathBuf;
use anyhow::{Result, Context};

use crate::components::data_table::export::DEFAULT_EXPORT_FILE;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Rows per page in the demo table
    pub page_size: usize,
    /// Where CSV exports are written
    pub export_path: PathBuf,
    /// Log file used while the TUI owns the terminal
    pub log_file: PathBuf,
    /// Optional JSON dataset replacing the built-in sample customers
    pub data_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: 10,
            export_path: PathBuf::from(DEFAULT_EXPORT_FILE),
            log_file: PathBuf::from("uzence.log"),
            data_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let page_size = parse_env_var("UZENCE_PAGE_SIZE")?.unwrap_or(defaults.page_size);

        let export_path = std::env::var("UZENCE_EXPORT_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.export_path);

        let log_file = std::env::var("UZENCE_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file);

        let data_path = std::env::var("UZENCE_DATA_PATH").ok().map(PathBuf::from);

        Ok(Config {
            page_size,
            export_path,
            log_file,
            data_path,
        })
    }

    /// Override the page size, e.g. from a command line flag
    pub fn with_page_size(mut self, page_size: Option<usize>) -> Self {
        if let Some(page_size) = page_size {
            self.page_size = page_size;
        }
        self
    }

    /// Override the dataset path
    pub fn with_data_path(mut self, data_path: Option<PathBuf>) -> Self {
        if data_path.is_some() {
            self.data_path = data_path;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(anyhow::anyhow!("Page size must be a positive integer"));
        }

        if let Some(ref path) = self.data_path {
            if !path.exists() {
                return Err(anyhow::anyhow!("Dataset file does not exist: {}", path.display()));
            }
        }

        if let Some(parent) = self.export_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(anyhow::anyhow!(
                    "Export directory does not exist: {}",
                    parent.display()
                ));
            }
        }

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.export_path, PathBuf::from("data-export.csv"));
        assert_eq!(config.log_file, PathBuf::from("uzence.log"));
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_config_validation() {
        Config::default().validate().unwrap();

        let zero_pages = Config::default().with_page_size(Some(0));
        assert!(zero_pages.validate().is_err());

        let missing_data = Config::default()
            .with_data_path(Some(PathBuf::from("./does-not-exist/customers.json")));
        assert!(missing_data.validate().is_err());
    }

    #[test]
    fn test_overrides_keep_defaults_when_absent() {
        let config = Config::default().with_page_size(None).with_data_path(None);
        assert_eq!(config.page_size, 10);
        assert!(config.data_path.is_none());
    }
}
