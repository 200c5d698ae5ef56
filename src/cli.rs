use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::components::data_table::{Column, DataTable, DataTableConfig, SortState};
use crate::components::input_field::InputType;
use crate::models::Row;

#[derive(Parser)]
#[command(name = "uzence")]
#[command(about = "Terminal validated-input and data-table components, with a demo and headless tools")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive component demo
    Demo {
        /// Rows per page in the customer table
        #[arg(long)]
        page_size: Option<usize>,

        /// JSON dataset (array of objects) replacing the sample customers
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Search, filter and sort a JSON dataset and write it as CSV
    Export {
        /// JSON file holding an array of objects
        #[arg(short, long)]
        input: PathBuf,

        /// Comma-separated column keys; `key:Header` sets a header label
        #[arg(short, long)]
        columns: String,

        /// Case-insensitive search across the columns
        #[arg(short, long)]
        search: Option<String>,

        /// Column filter as key=value (repeatable)
        #[arg(short, long = "filter")]
        filters: Vec<String>,

        /// Column key to sort by
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,

        /// Output CSV path (defaults to the configured export path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a value against validation rules
    Validate {
        /// Value to check
        #[arg(long)]
        value: String,

        /// Input type (text, email, password, number, tel, url, search)
        #[arg(long = "type", default_value = "text")]
        input_type: String,

        #[arg(long)]
        required: bool,

        #[arg(long)]
        min_length: Option<usize>,

        #[arg(long)]
        max_length: Option<usize>,

        /// Numeric lower bound
        #[arg(long)]
        min: Option<f64>,

        /// Numeric upper bound
        #[arg(long)]
        max: Option<f64>,

        /// Regular expression the whole value must match
        #[arg(long)]
        pattern: Option<String>,
    },
}

/// A column requested on the command line
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub key: String,
    pub header: String,
}

impl Commands {
    pub fn parse_input_type(input_type: &str) -> Result<InputType> {
        Ok(input_type.parse::<InputType>()?)
    }

    /// `name,email:E-mail` → keys with headers (header defaults to the key)
    pub fn parse_columns(columns: &str) -> Result<Vec<ColumnSpec>> {
        let specs: Vec<ColumnSpec> = columns
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| match c.split_once(':') {
                Some((key, header)) => ColumnSpec {
                    key: key.trim().to_string(),
                    header: header.trim().to_string(),
                },
                None => ColumnSpec {
                    key: c.to_string(),
                    header: c.to_string(),
                },
            })
            .collect();

        if specs.is_empty() {
            return Err(anyhow!("At least one column is required"));
        }
        Ok(specs)
    }

    /// `status=active` → (`status`, `active`)
    pub fn parse_filter(filter: &str) -> Result<(String, String)> {
        match filter.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(anyhow!("Invalid filter '{}'. Expected key=value", filter)),
        }
    }
}

/// Run the table pipeline over `rows` and write every matching row as CSV
pub fn export_rows(
    rows: Vec<Row>,
    specs: &[ColumnSpec],
    search: Option<&str>,
    filters: &[(String, String)],
    sort: Option<SortState>,
    output: &Path,
) -> Result<usize> {
    let columns: Vec<Column> = specs
        .iter()
        .map(|spec| Column::new(&spec.key, &spec.header).sortable())
        .collect();
    let config = DataTableConfig::new("Export").with_export_path(output.to_path_buf());
    let mut table = DataTable::new(rows, columns, config)?;

    if let Some(search) = search {
        table.set_search(search);
    }
    for (key, value) in filters {
        table.set_column_filter(key, value);
    }
    table.set_sort(sort).context("Invalid sort column")?;

    info!(
        "Exporting {} of {} rows to {}",
        table.filtered_len(),
        table.rows().len(),
        output.display()
    );
    table
        .export_csv()
        .with_context(|| format!("Failed to write {}", output.display()))
}
