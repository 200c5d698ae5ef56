//! Column descriptors for the data table

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use ratatui::{layout::Alignment, text::Line};

use crate::errors::{Result, UzenceError};
use crate::models::{Row, Value};

/// Horizontal alignment of a column's header and cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl From<Align> for Alignment {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => Alignment::Left,
            Align::Center => Alignment::Center,
            Align::Right => Alignment::Right,
        }
    }
}

/// Maps a cell's raw value (and its row) to the line displayed for it
pub type CellRenderer = Arc<dyn Fn(&Value, &Row) -> Line<'static> + Send + Sync>;

#[derive(Clone)]
pub struct Column {
    pub key: String,
    pub header: String,
    pub sortable: bool,
    pub filterable: bool,
    /// Fixed width in terminal cells; flexible when absent
    pub width: Option<u16>,
    pub align: Align,
    render: Option<CellRenderer>,
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Column {
    pub fn new(key: &str, header: &str) -> Self {
        Self {
            key: key.to_string(),
            header: header.to_string(),
            sortable: false,
            filterable: true,
            width: None,
            align: Align::Left,
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Value, &Row) -> Line<'static> + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn has_render(&self) -> bool {
        self.render.is_some()
    }

    /// The displayed line for this column's cell in `row`
    pub fn render_cell(&self, row: &Row) -> Line<'static> {
        let value = row.value(&self.key);
        let line = match self.render {
            Some(ref render) => render(value, row),
            None => Line::from(value.to_string()),
        };
        line.alignment(self.align.into())
    }
}

/// Reject column sets with duplicate keys
pub fn validate_columns(columns: &[Column]) -> Result<()> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.key.as_str()) {
            return Err(UzenceError::DuplicateColumn(column.key.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::line_text;

    #[test]
    fn test_column_defaults() {
        let column = Column::new("name", "Name");
        assert!(!column.sortable);
        assert!(column.filterable);
        assert_eq!(column.align, Align::Left);
        assert!(!column.has_render());
    }

    #[test]
    fn test_render_cell_raw_and_custom() {
        let row = Row::new().with("orders", 12i64).with("name", "John Smith");

        let raw = Column::new("orders", "Orders").align(Align::Center);
        let line = raw.render_cell(&row);
        assert_eq!(line_text(&line), "12");
        assert_eq!(line.alignment, Some(Alignment::Center));

        let custom = Column::new("orders", "Orders")
            .with_render(|value, row| Line::from(format!("{} by {}", value, row.text("name"))));
        assert_eq!(line_text(&custom.render_cell(&row)), "12 by John Smith");

        let missing = Column::new("email", "Email");
        assert_eq!(line_text(&missing.render_cell(&row)), "");
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let columns = vec![Column::new("name", "Name"), Column::new("name", "Other")];
        assert!(matches!(
            validate_columns(&columns),
            Err(UzenceError::DuplicateColumn(key)) if key == "name"
        ));
    }
}
