//! CSV export of the filtered and sorted table view

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::info;

use crate::errors::Result;
use crate::models::Row;

use super::column::Column;

pub const DEFAULT_EXPORT_FILE: &str = "data-export.csv";

/// Write a header row of column headers followed by one line per row.
///
/// Data fields are always double-quoted with embedded quotes doubled; the
/// header is quoted only when a label needs it. Returns the number of data
/// rows written.
pub fn write_csv<'a, W, I>(writer: W, columns: &[Column], rows: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Row>,
{
    let mut header_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    header_writer.write_record(columns.iter().map(|c| c.header.as_str()))?;
    let writer = header_writer.into_inner().map_err(|e| e.into_error())?;

    let mut data_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    let mut count = 0;
    for row in rows {
        data_writer.write_record(columns.iter().map(|c| row.text(&c.key)))?;
        count += 1;
    }
    data_writer.flush()?;

    Ok(count)
}

/// Render the export as a string
pub fn to_csv_string<'a, I>(columns: &[Column], rows: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut buffer = Vec::new();
    write_csv(&mut buffer, columns, rows)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write the export to a file, replacing any existing one
pub fn export_to_path<'a, I>(path: &Path, columns: &[Column], rows: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a Row>,
{
    let file = File::create(path)?;
    let count = write_csv(BufWriter::new(file), columns, rows)?;
    info!("Exported {} rows to {}", count, path.display());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Customer"),
            Column::new("orders", "Orders"),
            Column::new("note", "Note"),
        ]
    }

    #[test]
    fn test_csv_has_header_and_quoted_fields() {
        let rows = vec![
            Row::new().with("name", "John Smith").with("orders", 12i64).with("note", "vip"),
            Row::new().with("name", "Emily Wilson").with("orders", 0i64),
        ];
        let csv = to_csv_string(&columns(), &rows).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), rows.len() + 1);
        assert_eq!(lines[0], "Customer,Orders,Note");
        assert_eq!(lines[1], r#""John Smith","12","vip""#);
        assert_eq!(lines[2], r#""Emily Wilson","0","""#);
    }

    #[test]
    fn test_csv_escapes_embedded_quotes_and_commas() {
        let rows = vec![Row::new().with("name", r#"Smith, "JJ""#).with("orders", 1i64)];
        let csv = to_csv_string(&columns(), &rows).unwrap();
        assert_eq!(csv.lines().nth(1), Some(r#""Smith, ""JJ""","1","""#));

        let quoted_header = vec![Column::new("a", "Total, USD")];
        let csv = to_csv_string(&quoted_header, &Vec::<Row>::new()).unwrap();
        assert_eq!(csv, "\"Total, USD\"\n");
    }

    #[test]
    fn test_export_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_FILE);
        let rows = vec![Row::new().with("name", "Mike Davis")];

        let count = export_to_path(&path, &columns(), &rows).unwrap();
        assert_eq!(count, 1);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Customer,Orders,Note\n\"Mike Davis\",\"\",\"\"\n");
    }
}
