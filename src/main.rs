use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use uzence::cli::{export_rows, Cli, Commands};
use uzence::components::data_table::SortState;
use uzence::components::input_field::{FieldRules, ValidationRules};
use uzence::config::Config;
use uzence::demo;
use uzence::models::load_rows_from_json;

/// Log to a file while the TUI owns the terminal, to stderr otherwise
fn init_logging(log_file: Option<&Path>) {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "uzence=info");
    }

    match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|name| name.to_os_string())
                .unwrap_or_else(|| "uzence.log".into());
            let file_appender = tracing_appender::rolling::never(directory, file_name);

            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(file_appender)
                        .with_ansi(false)
                        .with_filter(EnvFilter::from_default_env()),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_filter(EnvFilter::from_default_env()),
                )
                .init();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Demo { page_size, data } => {
            init_logging(Some(&config.log_file));

            let config = config.with_page_size(page_size).with_data_path(data);
            config.validate().context("Invalid demo configuration")?;
            demo::run_demo(config)?;
        }

        Commands::Export {
            input,
            columns,
            search,
            filters,
            sort,
            desc,
            output,
        } => {
            init_logging(None);

            let specs = Commands::parse_columns(&columns)?;
            let filters = filters
                .iter()
                .map(|f| Commands::parse_filter(f))
                .collect::<Result<Vec<_>>>()?;
            let sort = sort.map(|column| {
                if desc {
                    SortState::descending(&column)
                } else {
                    SortState::ascending(&column)
                }
            });
            let output = output.unwrap_or(config.export_path);

            let rows = load_rows_from_json(&input)
                .with_context(|| format!("Failed to load {}", input.display()))?;
            match export_rows(rows, &specs, search.as_deref(), &filters, sort, &output) {
                Ok(count) => {
                    info!("Export finished");
                    println!("Exported {} rows to {}", count, output.display());
                }
                Err(e) => {
                    error!("Export failed: {:#}", e);
                    return Err(e);
                }
            }
        }

        Commands::Validate {
            value,
            input_type,
            required,
            min_length,
            max_length,
            min,
            max,
            pattern,
        } => {
            init_logging(None);

            let rules = FieldRules {
                input_type: Commands::parse_input_type(&input_type)?,
                required,
                min_length,
                max_length,
                pattern,
                validation: ValidationRules { min, max, custom: None },
            };

            // Reject a malformed pattern up front
            rules.compiled_pattern().context("Invalid --pattern")?;

            match rules.check_validity(&value) {
                Ok(()) if value.is_empty() => println!("✓ Empty optional value"),
                Ok(()) => println!("✓ Valid"),
                Err(e) => {
                    println!("✗ {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
