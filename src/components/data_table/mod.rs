//! Queryable data table component
//!
//! Holds a dataset and its column descriptors, derives the searched,
//! filtered, sorted and paginated view, tracks row selection and dispatches
//! row clicks, row actions and CSV export.

pub mod actions;
pub mod column;
pub mod export;
pub mod query;
pub mod selection;

pub use actions::{CustomAction, RowAction, RowActions, RowCallback};
pub use column::{validate_columns, Align, CellRenderer, Column};
pub use query::{SortDirection, SortState, TableQuery};
pub use selection::{Selection, SelectionKey};

use std::io::Write;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Cell, Paragraph, Row as TableRow, Table, TableState},
    Frame,
};
use tracing::{debug, info, warn};
use unicode_width::UnicodeWidthStr;

use crate::errors::{Result, UzenceError};
use crate::models::Row;
use crate::traits::{Navigable, Paginated};
use crate::ui::{cursor_x, line_text, truncate_to_width, Styles};

use self::export::DEFAULT_EXPORT_FILE;

const FILTERS_PER_ROW: usize = 3;
const HIGHLIGHT_SYMBOL: &str = "> ";

/// Configuration for the data table
#[derive(Debug, Clone)]
pub struct DataTableConfig {
    pub title: String,
    pub page_size: usize,
    pub searchable: bool,
    pub filterable: bool,
    pub exportable: bool,
    pub selectable: bool,
    pub empty_message: String,
    pub loading_message: String,
    /// Field that identifies a record; selection follows it across views
    pub row_key: Option<String>,
    pub export_path: PathBuf,
}

impl Default for DataTableConfig {
    fn default() -> Self {
        Self {
            title: "Data Table".to_string(),
            page_size: 10,
            searchable: true,
            filterable: true,
            exportable: false,
            selectable: false,
            empty_message: "No data available".to_string(),
            loading_message: "Loading data...".to_string(),
            row_key: None,
            export_path: PathBuf::from(DEFAULT_EXPORT_FILE),
        }
    }
}

impl DataTableConfig {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    pub fn exportable(mut self, exportable: bool) -> Self {
        self.exportable = exportable;
        self
    }

    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn with_empty_message(mut self, message: &str) -> Self {
        self.empty_message = message.to_string();
        self
    }

    pub fn with_loading_message(mut self, message: &str) -> Self {
        self.loading_message = message.to_string();
        self
    }

    pub fn with_row_key(mut self, row_key: &str) -> Self {
        self.row_key = Some(row_key.to_string());
        self
    }

    pub fn with_export_path(mut self, path: PathBuf) -> Self {
        self.export_path = path;
        self
    }
}

/// Which part of the table receives typed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFocus {
    Rows,
    Search,
    /// Index into the filterable columns
    Filter(usize),
}

/// Result of handling a key, for the host to react to
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    None,
    Handled,
    /// Dataset index of the clicked row
    RowClicked(usize),
    ActionInvoked(RowAction, usize),
    Exported(usize),
    ExportFailed(String),
}

pub struct DataTable {
    rows: Vec<Row>,
    columns: Vec<Column>,
    config: DataTableConfig,
    actions: Option<RowActions>,
    on_row_click: Option<RowCallback>,
    loading: bool,
    query: TableQuery,
    /// Filtered and sorted dataset indices
    view: Vec<usize>,
    selection: Selection,
    state: TableState,
    focus: TableFocus,
    show_filters: bool,
    /// Index into the sortable columns
    sort_cursor: usize,
}

impl DataTable {
    pub fn new(rows: Vec<Row>, columns: Vec<Column>, config: DataTableConfig) -> Result<Self> {
        if config.page_size == 0 {
            return Err(UzenceError::InvalidPageSize(config.page_size));
        }
        validate_columns(&columns)?;

        let selection = Selection::new(config.row_key.clone());
        let mut table = Self {
            rows,
            columns,
            config,
            actions: None,
            on_row_click: None,
            loading: false,
            query: TableQuery::new(),
            view: Vec::new(),
            selection,
            state: TableState::default(),
            focus: TableFocus::Rows,
            show_filters: false,
            sort_cursor: 0,
        };
        table.recompute();
        Ok(table)
    }

    pub fn with_actions(mut self, actions: RowActions) -> Self {
        self.actions = Some(actions);
        self
    }

    pub fn on_row_click<F: FnMut(&Row) + 'static>(mut self, callback: F) -> Self {
        self.on_row_click = Some(Box::new(callback));
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn config(&self) -> &DataTableConfig {
        &self.config
    }

    pub fn query(&self) -> &TableQuery {
        &self.query
    }

    pub fn focus(&self) -> TableFocus {
        self.focus
    }

    pub fn filters_shown(&self) -> bool {
        self.show_filters
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Replace the dataset. Selection is dropped since its records are gone.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.selection.clear();
        self.recompute();
    }

    pub fn set_search(&mut self, search: &str) {
        if self.query.search != search {
            self.query.search = search.to_string();
            self.recompute();
        }
    }

    /// Set the filter for a field; an empty value deactivates it
    pub fn set_column_filter(&mut self, key: &str, value: &str) {
        if self.query.filter(key) == value {
            return;
        }
        if value.is_empty() {
            self.query.column_filters.remove(key);
        } else {
            self.query.column_filters.insert(key.to_string(), value.to_string());
        }
        self.recompute();
    }

    /// Header activation: cycles none → asc → desc → none. Non-sortable or
    /// unknown columns are ignored.
    pub fn activate_sort(&mut self, key: &str) {
        match self.column(key) {
            Some(column) if column.sortable => {}
            _ => {
                debug!("Ignoring sort activation on '{}'", key);
                return;
            }
        }
        self.query.sort = query::next_sort(self.query.sort.as_ref(), key);
        match self.query.sort {
            Some(ref sort) => info!("Sorting by {} {}", sort.column, sort.direction.as_str()),
            None => info!("Sort cleared"),
        }
        self.recompute();
    }

    /// Set the sort directly. The column must exist and be sortable.
    pub fn set_sort(&mut self, sort: Option<SortState>) -> Result<()> {
        if let Some(ref sort) = sort {
            let column = self
                .column(&sort.column)
                .ok_or_else(|| UzenceError::UnknownColumn(sort.column.clone()))?;
            if !column.sortable {
                return Err(UzenceError::NotSortable(sort.column.clone()));
            }
        }
        self.query.sort = sort;
        self.recompute();
        Ok(())
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.query.sort.as_ref()
    }

    /// Back to page 1 with no search, filters, sort or selection
    pub fn reset_view(&mut self) {
        self.query.reset();
        self.selection.clear();
        self.focus = TableFocus::Rows;
        self.recompute();
    }

    fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    fn sortable_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.sortable).collect()
    }

    fn filterable_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.filterable).collect()
    }

    /// Re-derive the view after any query change
    fn recompute(&mut self) {
        self.view = self.query.derive_view(&self.rows, &self.columns);
        let page = query::clamp_page(self.query.current_page, self.total_pages());
        if page != self.query.current_page {
            debug!("Clamping page {} to {}", self.query.current_page, page);
            self.query.current_page = page;
        }
        self.selection.on_view_changed();
        self.reset_cursor();
    }

    fn reset_cursor(&mut self) {
        let count = self.page_indices().len();
        let cursor = match self.state.selected() {
            _ if count == 0 => None,
            Some(i) => Some(i.min(count - 1)),
            None => Some(0),
        };
        self.state.select(cursor);
    }

    /// Number of rows left after search and filters
    pub fn filtered_len(&self) -> usize {
        self.view.len()
    }

    /// `ceil(filtered / page_size)`; zero for an empty view
    pub fn total_pages(&self) -> usize {
        query::total_pages(self.view.len(), self.config.page_size)
    }

    /// Dataset indices shown on the current page
    pub fn page_indices(&self) -> &[usize] {
        query::paginate(&self.view, self.query.current_page, self.config.page_size)
    }

    pub fn page_rows(&self) -> Vec<&Row> {
        self.page_indices().iter().map(|&i| &self.rows[i]).collect()
    }

    /// Filtered and sorted rows across all pages
    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.view.iter().map(|&i| &self.rows[i])
    }

    pub fn cursor_row(&self) -> Option<&Row> {
        let position = self.get_selected_index()?;
        self.page_indices().get(position).map(|&i| &self.rows[i])
    }

    fn page_keys(&self) -> Vec<SelectionKey> {
        self.page_indices()
            .iter()
            .enumerate()
            .map(|(position, &i)| self.selection.key_for(position, &self.rows[i]))
            .collect()
    }

    pub fn is_row_selected(&self, position: usize) -> bool {
        self.page_indices()
            .get(position)
            .map(|&i| self.selection.is_selected(&self.selection.key_for(position, &self.rows[i])))
            .unwrap_or(false)
    }

    /// Toggle selection of the row at `position` on the current page
    pub fn toggle_row_selection(&mut self, position: usize) -> bool {
        let key = match self.page_indices().get(position) {
            Some(&i) => self.selection.key_for(position, &self.rows[i]),
            None => return false,
        };
        self.selection.toggle(key);
        true
    }

    pub fn toggle_select_all(&mut self) {
        let keys = self.page_keys();
        self.selection.toggle_all(&keys);
    }

    pub fn all_selected(&self) -> bool {
        self.selection.all_selected(&self.page_keys())
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Selected records. With a row key these may span pages.
    pub fn selected_rows(&self) -> Vec<&Row> {
        match self.selection.row_key() {
            Some(field) => self
                .rows
                .iter()
                .filter(|row| self.selection.is_selected(&SelectionKey::Id(row.text(field))))
                .collect(),
            None => self
                .page_indices()
                .iter()
                .enumerate()
                .filter(|(position, _)| {
                    self.selection.is_selected(&SelectionKey::Position(*position))
                })
                .map(|(_, &i)| &self.rows[i])
                .collect(),
        }
    }

    /// Fire the row-click callback for a row of the current page
    pub fn click_row(&mut self, position: usize) -> Option<usize> {
        let index = *self.page_indices().get(position)?;
        if let Some(ref mut callback) = self.on_row_click {
            callback(&self.rows[index]);
        }
        Some(index)
    }

    /// Run a row action for a row of the current page. Never triggers the
    /// row click.
    pub fn invoke_action(&mut self, action: RowAction, position: usize) -> Option<usize> {
        let index = *self.page_indices().get(position)?;
        let actions = self.actions.as_mut()?;
        if actions.invoke(action, &self.rows[index]) {
            debug!("Invoked {:?} on row {}", action, index);
            Some(index)
        } else {
            None
        }
    }

    /// Write the filtered and sorted dataset to the configured export path
    pub fn export_csv(&self) -> Result<usize> {
        export::export_to_path(&self.config.export_path, &self.columns, self.visible_rows())
    }

    pub fn export_csv_to<W: Write>(&self, writer: W) -> Result<usize> {
        export::write_csv(writer, &self.columns, self.visible_rows())
    }

    pub fn toggle_filters(&mut self) {
        if !self.config.filterable || self.filterable_columns().is_empty() {
            return;
        }
        self.show_filters = !self.show_filters;
        self.focus = if self.show_filters {
            TableFocus::Filter(0)
        } else {
            TableFocus::Rows
        };
    }

    pub fn focus_search(&mut self) {
        if self.config.searchable {
            self.focus = TableFocus::Search;
        }
    }

    fn move_sort_cursor(&mut self, forward: bool) {
        let count = self.sortable_columns().len();
        if count == 0 {
            return;
        }
        self.sort_cursor = if forward {
            (self.sort_cursor + 1) % count
        } else {
            (self.sort_cursor + count - 1) % count
        };
    }

    fn sort_cursor_key(&self) -> Option<String> {
        self.sortable_columns()
            .get(self.sort_cursor)
            .map(|c| c.key.clone())
    }

    /// Handle keyboard input
    pub fn handle_key_event(&mut self, key: KeyEvent) -> TableEvent {
        if self.loading {
            return TableEvent::None;
        }

        match self.focus {
            TableFocus::Rows => self.handle_rows_key(key),
            TableFocus::Search => self.handle_search_key(key),
            TableFocus::Filter(index) => self.handle_filter_key(key, index),
        }
    }

    fn handle_rows_key(&mut self, key: KeyEvent) -> TableEvent {
        match key.code {
            KeyCode::Up => self.navigate_up(),
            KeyCode::Down => self.navigate_down(),
            KeyCode::Left => self.previous_page(),
            KeyCode::Right => self.next_page(),
            KeyCode::PageUp => self.navigate_to_first(),
            KeyCode::PageDown => self.navigate_to_last(),
            KeyCode::Home => self.go_to_first_page(),
            KeyCode::End => self.go_to_last_page(),
            KeyCode::Char(c @ '1'..='9') => {
                let page = c.to_digit(10).unwrap_or(1) as usize;
                self.set_current_page(page);
            }
            KeyCode::Char('/') if self.config.searchable => self.focus_search(),
            KeyCode::Char('f') if self.config.filterable => self.toggle_filters(),
            KeyCode::Tab if self.show_filters => self.focus = TableFocus::Filter(0),
            KeyCode::Char('<') => self.move_sort_cursor(false),
            KeyCode::Char('>') => self.move_sort_cursor(true),
            KeyCode::Char('o') => {
                if let Some(column) = self.sort_cursor_key() {
                    self.activate_sort(&column);
                }
            }
            KeyCode::Char(' ') if self.config.selectable => {
                if let Some(position) = self.state.selected() {
                    self.toggle_row_selection(position);
                }
            }
            KeyCode::Char('a') if self.config.selectable => self.toggle_select_all(),
            KeyCode::Enter => {
                return match self.state.selected().and_then(|p| self.click_row(p)) {
                    Some(index) => TableEvent::RowClicked(index),
                    None => TableEvent::None,
                };
            }
            KeyCode::Char('v') => return self.action_event(RowAction::View),
            KeyCode::Char('e') => return self.action_event(RowAction::Edit),
            KeyCode::Char('x') => return self.action_event(RowAction::Delete),
            KeyCode::F(n @ 2..=9) => return self.action_event(RowAction::Custom(n as usize - 2)),
            KeyCode::Char('c') if self.config.exportable => {
                return match self.export_csv() {
                    Ok(count) => TableEvent::Exported(count),
                    Err(e) => {
                        warn!("CSV export failed: {}", e);
                        TableEvent::ExportFailed(e.to_string())
                    }
                };
            }
            _ => return TableEvent::None,
        }
        TableEvent::Handled
    }

    fn action_event(&mut self, action: RowAction) -> TableEvent {
        match self
            .state
            .selected()
            .and_then(|position| self.invoke_action(action, position))
        {
            Some(index) => TableEvent::ActionInvoked(action, index),
            None => TableEvent::None,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> TableEvent {
        let mut search = self.query.search.clone();
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.focus = TableFocus::Rows;
                return TableEvent::Handled;
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => search.clear(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => search.push(c),
            KeyCode::Backspace => {
                search.pop();
            }
            _ => return TableEvent::None,
        }
        self.set_search(&search);
        TableEvent::Handled
    }

    fn handle_filter_key(&mut self, key: KeyEvent, index: usize) -> TableEvent {
        let keys: Vec<String> = self
            .filterable_columns()
            .iter()
            .map(|c| c.key.clone())
            .collect();
        let Some(column_key) = keys.get(index) else {
            self.focus = TableFocus::Rows;
            return TableEvent::Handled;
        };

        let mut value = self.query.filter(column_key).to_string();
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.focus = TableFocus::Rows;
                return TableEvent::Handled;
            }
            KeyCode::Tab => {
                self.focus = TableFocus::Filter((index + 1) % keys.len());
                return TableEvent::Handled;
            }
            KeyCode::BackTab => {
                self.focus = TableFocus::Filter((index + keys.len() - 1) % keys.len());
                return TableEvent::Handled;
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => value.clear(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => value.push(c),
            KeyCode::Backspace => {
                value.pop();
            }
            _ => return TableEvent::None,
        }
        self.set_column_filter(column_key, &value);
        TableEvent::Handled
    }

    /// Key hints for the current focus
    pub fn help_line(&self) -> String {
        match self.focus {
            TableFocus::Search => "Type to search | Enter/Esc: back to rows".to_string(),
            TableFocus::Filter(_) => "Type to filter | Tab: next filter | Enter/Esc: back to rows".to_string(),
            TableFocus::Rows => {
                let mut hints = vec!["↑↓ PgUp/PgDn: Row", "←→ Home/End: Page"];
                if self.config.searchable {
                    hints.push("/: Search");
                }
                if self.config.filterable {
                    hints.push("f: Filters");
                }
                hints.push("<>o: Sort");
                if self.config.selectable {
                    hints.push("Space/a: Select");
                }
                if self.config.exportable {
                    hints.push("c: Export");
                }
                hints.join(" | ")
            }
        }
    }

    /// Render the table
    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        if self.loading {
            let block = Block::default()
                .title(self.config.title.clone())
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border());
            let inner = block.inner(area);
            f.render_widget(block, area);
            let message = Paragraph::new(Line::from(Span::styled(
                format!("⟳ {}", self.config.loading_message),
                Styles::info(),
            )))
            .alignment(Alignment::Center);
            f.render_widget(message, vertical_center(inner));
            return;
        }

        let mut title_spans = vec![Span::styled(
            format!("{} ({} items)", self.config.title, self.filtered_len()),
            Styles::title(),
        )];
        if self.selected_count() > 0 {
            title_spans.push(Span::raw(" "));
            title_spans.push(Span::styled(
                format!("{} selected", self.selected_count()),
                Styles::selected(),
            ));
        }
        let block = Block::default()
            .title(Line::from(title_spans))
            .title(Title::from(self.toolbar_line()).alignment(Alignment::Right))
            .borders(Borders::ALL)
            .border_style(if self.focus == TableFocus::Rows {
                Styles::active_border()
            } else {
                Styles::inactive_border()
            });
        let inner = block.inner(area);
        f.render_widget(block, area);

        let filter_count = self.filterable_columns().len();
        let filter_rows = if self.show_filters {
            filter_count.div_ceil(FILTERS_PER_ROW) as u16
        } else {
            0
        };

        let mut constraints = Vec::new();
        if self.config.searchable {
            constraints.push(Constraint::Length(3));
        }
        if filter_rows > 0 {
            constraints.push(Constraint::Length(3 * filter_rows));
        }
        constraints.push(Constraint::Min(3));
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        let mut next = 0;
        if self.config.searchable {
            self.render_search(f, chunks[next]);
            next += 1;
        }
        if filter_rows > 0 {
            self.render_filters(f, chunks[next]);
            next += 1;
        }
        self.render_rows(f, chunks[next]);
        self.render_footer(f, chunks[next + 1]);
    }

    fn toolbar_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        if self.config.filterable {
            let active = self.query.active_filter_count();
            let label = if active > 0 {
                format!(" [f] Filters ({}) ", active)
            } else {
                " [f] Filters ".to_string()
            };
            let style = if self.show_filters {
                Styles::info().add_modifier(Modifier::BOLD)
            } else {
                Styles::inactive()
            };
            spans.push(Span::styled(label, style));
        }
        if self.config.exportable {
            spans.push(Span::styled(" [c] Export CSV ", Styles::inactive()));
        }
        Line::from(spans)
    }

    fn render_search(&self, f: &mut Frame, area: Rect) {
        let focused = self.focus == TableFocus::Search;
        let text = if self.query.search.is_empty() {
            Span::styled("Search...", Styles::disabled())
        } else {
            Span::raw(self.query.search.clone())
        };
        let block = Block::default()
            .title("Search [/]")
            .borders(Borders::ALL)
            .border_style(if focused {
                Styles::focused_border()
            } else {
                Styles::inactive_border()
            });
        f.render_widget(Paragraph::new(Line::from(text)).block(block), area);

        if focused {
            let x = cursor_x(area.x, self.query.search.width());
            f.set_cursor(x.min(area.right().saturating_sub(2)), area.y + 1);
        }
    }

    fn render_filters(&self, f: &mut Frame, area: Rect) {
        let columns = self.filterable_columns();
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(3); columns.len().div_ceil(FILTERS_PER_ROW)])
            .split(area);

        for (row_index, chunk) in columns.chunks(FILTERS_PER_ROW).enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, FILTERS_PER_ROW as u32); FILTERS_PER_ROW])
                .split(row_areas[row_index]);

            for (offset, column) in chunk.iter().enumerate() {
                let index = row_index * FILTERS_PER_ROW + offset;
                let focused = self.focus == TableFocus::Filter(index);
                let value = self.query.filter(&column.key);
                let text = if value.is_empty() {
                    Span::styled(format!("Filter {}...", column.header), Styles::disabled())
                } else {
                    Span::raw(value.to_string())
                };
                let block = Block::default()
                    .title(format!("Filter {}", column.header))
                    .borders(Borders::ALL)
                    .border_style(if focused {
                        Styles::focused_border()
                    } else {
                        Styles::inactive_border()
                    });
                let cell = cells[offset];
                f.render_widget(Paragraph::new(Line::from(text)).block(block), cell);

                if focused {
                    let x = cursor_x(cell.x, value.width());
                    f.set_cursor(x.min(cell.right().saturating_sub(2)), cell.y + 1);
                }
            }
        }
    }

    fn render_rows(&mut self, f: &mut Frame, area: Rect) {
        if self.view.is_empty() {
            let message = Paragraph::new(Line::from(Span::styled(
                self.config.empty_message.clone(),
                Styles::inactive(),
            )))
            .alignment(Alignment::Center);
            f.render_widget(message, vertical_center(area));
            return;
        }

        let sort_key = self.sort_cursor_key();
        let action_labels = self
            .actions
            .as_ref()
            .map(|a| a.button_labels().join(" "))
            .unwrap_or_default();

        let flex_width = self.flexible_column_width(area.width, action_labels.width() as u16);
        let mut widths = Vec::new();
        let mut header_cells = Vec::new();
        if self.config.selectable {
            widths.push(Constraint::Length(3));
            let mark = if self.all_selected() { "[x]" } else { "[ ]" };
            header_cells.push(Cell::from(mark));
        }
        for column in &self.columns {
            widths.push(match column.width {
                Some(width) => Constraint::Length(width),
                None => Constraint::Length(flex_width),
            });
            let indicator = match self.query.sort {
                Some(ref sort) if sort.column == column.key => match sort.direction {
                    SortDirection::Ascending => " ▲",
                    SortDirection::Descending => " ▼",
                },
                _ => "",
            };
            let mut style = Styles::header();
            if column.sortable && sort_key.as_deref() == Some(column.key.as_str()) {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            let header = Line::from(Span::styled(
                format!("{}{}", column.header, indicator),
                style,
            ))
            .alignment(column.align.into());
            header_cells.push(Cell::from(header));
        }
        if !action_labels.is_empty() {
            widths.push(Constraint::Length(action_labels.width() as u16));
            header_cells.push(Cell::from(Span::styled("Actions", Styles::header())));
        }

        let table_rows: Vec<TableRow> = self
            .page_indices()
            .iter()
            .enumerate()
            .map(|(position, &index)| {
                let row = &self.rows[index];
                let selected = self
                    .selection
                    .is_selected(&self.selection.key_for(position, row));
                let mut cells = Vec::new();
                if self.config.selectable {
                    cells.push(Cell::from(if selected { "[x]" } else { "[ ]" }));
                }
                for column in &self.columns {
                    let mut line = column.render_cell(row);
                    let width = column.width.unwrap_or(flex_width) as usize;
                    if !column.has_render() && line.width() > width {
                        let text = truncate_to_width(&line_text(&line), width);
                        line = Line::from(text).alignment(column.align.into());
                    }
                    cells.push(Cell::from(line));
                }
                if !action_labels.is_empty() {
                    cells.push(Cell::from(Span::styled(action_labels.clone(), Styles::info())));
                }
                let table_row = TableRow::new(cells);
                if selected {
                    table_row.style(Styles::checked_row())
                } else {
                    table_row
                }
            })
            .collect();

        let table = Table::new(table_rows, widths)
            .header(TableRow::new(header_cells).bottom_margin(1))
            .highlight_style(Styles::selected())
            .highlight_symbol(HIGHLIGHT_SYMBOL)
            .column_spacing(1);

        f.render_stateful_widget(table, area, &mut self.state);
    }

    /// Width shared by columns without a fixed width, after the checkbox,
    /// fixed columns, actions, spacing and highlight symbol
    fn flexible_column_width(&self, total: u16, actions_width: u16) -> u16 {
        let flexible = self.columns.iter().filter(|c| c.width.is_none()).count() as u16;
        if flexible == 0 {
            return 0;
        }
        let mut used = self
            .columns
            .iter()
            .filter_map(|c| c.width)
            .fold(0u16, u16::saturating_add);
        let mut spaced = u16::try_from(self.columns.len()).unwrap_or(u16::MAX);
        if self.config.selectable {
            used = used.saturating_add(3);
            spaced = spaced.saturating_add(1);
        }
        if actions_width > 0 {
            used = used.saturating_add(actions_width);
            spaced = spaced.saturating_add(1);
        }
        used = used
            .saturating_add(spaced.saturating_sub(1))
            .saturating_add(HIGHLIGHT_SYMBOL.width() as u16);
        (total.saturating_sub(used) / flexible).max(4)
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let total = self.filtered_len();
        let (start, end) =
            query::page_bounds(self.query.current_page, self.config.page_size, total);
        let first = if total == 0 { 0 } else { start + 1 };
        let summary = format!("Showing {} to {} of {} entries", first, end, total);

        let (buttons, last) = query::page_buttons(self.total_pages());
        let current = self.query.current_page;
        let page_style = |page: usize| {
            if page == current {
                Styles::selected()
            } else {
                Styles::inactive()
            }
        };
        let mut spans = vec![Span::styled(
            "‹ ",
            if current > 1 { Styles::default() } else { Styles::disabled() },
        )];
        for page in buttons {
            spans.push(Span::styled(format!(" {} ", page), page_style(page)));
        }
        if let Some(last) = last {
            spans.push(Span::styled(" … ", Styles::inactive()));
            spans.push(Span::styled(format!(" {} ", last), page_style(last)));
        }
        spans.push(Span::styled(
            " ›",
            if current < self.total_pages() {
                Styles::default()
            } else {
                Styles::disabled()
            },
        ));

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(spans_width(&spans))])
            .split(area);
        f.render_widget(Paragraph::new(Span::styled(summary, Styles::inactive())), chunks[0]);
        f.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
    }
}

fn spans_width(spans: &[Span]) -> u16 {
    spans
        .iter()
        .map(|s| u16::try_from(s.content.width()).unwrap_or(u16::MAX))
        .fold(0, u16::saturating_add)
}

/// One-line strip in the middle of `area`
fn vertical_center(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    }
}

impl Navigable for DataTable {
    fn navigate_up(&mut self) {
        let count = self.get_item_count();
        if count == 0 {
            return;
        }
        let selected = self.state.selected().unwrap_or(0);
        let new_selected = if selected == 0 { count - 1 } else { selected - 1 };
        self.state.select(Some(new_selected));
    }

    fn navigate_down(&mut self) {
        let count = self.get_item_count();
        if count == 0 {
            return;
        }
        let selected = self.state.selected().unwrap_or(0);
        self.state.select(Some((selected + 1) % count));
    }

    fn get_selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        let count = self.get_item_count();
        self.state.select(index.filter(|&i| i < count));
    }

    fn get_item_count(&self) -> usize {
        self.page_indices().len()
    }
}

impl Paginated for DataTable {
    fn get_current_page(&self) -> usize {
        self.query.current_page
    }

    fn set_current_page(&mut self, page: usize) {
        let page = query::clamp_page(page, self.total_pages());
        if page == self.query.current_page {
            return;
        }
        info!("Table page {} -> {}", self.query.current_page, page);
        self.query.current_page = page;
        self.selection.on_view_changed();
        self.state.select(None);
        self.reset_cursor();
    }

    fn get_total_pages(&self) -> usize {
        self.total_pages().max(1)
    }

    fn get_items_per_page(&self) -> usize {
        self.config.page_size
    }
}
