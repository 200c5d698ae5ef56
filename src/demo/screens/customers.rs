//! Customer table screen

use std::sync::mpsc::{channel, Receiver, Sender};

use anyhow::{Context, Result};
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use tracing::info;

use crate::components::data_table::{DataTable, DataTableConfig, RowActions, TableEvent};
use crate::config::Config;
use crate::demo::sample_data::{customer_columns, sample_customers};
use crate::models::{load_rows_from_json, Row};
use crate::traits::{Screen, ScreenAction};

pub struct CustomersScreen {
    table: DataTable,
    /// Messages produced by row callbacks
    events: Receiver<String>,
}

fn notify(sender: &Sender<String>, action: &'static str) -> impl FnMut(&Row) + 'static {
    let sender = sender.clone();
    move |row: &Row| {
        info!("{} action for customer {}", action, row.text("name"));
        // The receiver lives as long as the screen owning this callback
        let _ = sender.send(format!("{} action for user: {}", action, row.text("name")));
    }
}

impl CustomersScreen {
    pub fn new(config: &Config) -> Result<Self> {
        let rows = match config.data_path {
            Some(ref path) => load_rows_from_json(path)
                .with_context(|| format!("Failed to load dataset from {}", path.display()))?,
            None => sample_customers(),
        };

        let table_config = DataTableConfig::new("Customers")
            .with_page_size(config.page_size)
            .exportable(true)
            .selectable(true)
            .with_row_key("id")
            .with_export_path(config.export_path.clone())
            .with_empty_message("No customers found matching your criteria");

        let (sender, events) = channel();
        let actions = RowActions::new()
            .on_view(notify(&sender, "View"))
            .on_edit(notify(&sender, "Edit"))
            .on_delete(notify(&sender, "Delete"));

        let click_sender = sender.clone();
        let table = DataTable::new(rows, customer_columns(), table_config)
            .context("Invalid customer table configuration")?
            .with_actions(actions)
            .on_row_click(move |row| {
                let _ = click_sender.send(format!("Clicked on user: {}", row.text("name")));
            });

        Ok(Self { table, events })
    }

    pub fn table(&self) -> &DataTable {
        &self.table
    }

    fn drain_events(&mut self) -> Option<String> {
        self.events.try_iter().last()
    }

    /// Context key hints for the table's current focus
    pub fn key_hint(&self) -> String {
        self.table.help_line()
    }
}

impl Screen for CustomersScreen {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        self.table.render(f, area);
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<ScreenAction> {
        let event = self.table.handle_key_event(key);
        let message = self.drain_events();

        let action = match event {
            TableEvent::Exported(count) => ScreenAction::SetStatus(format!(
                "Exported {} rows to {}",
                count,
                self.table.config().export_path.display()
            )),
            TableEvent::ExportFailed(error) => ScreenAction::SetError(format!("Export failed: {}", error)),
            TableEvent::RowClicked(_) | TableEvent::ActionInvoked(..) => {
                message.map(ScreenAction::SetStatus).unwrap_or(ScreenAction::None)
            }
            TableEvent::Handled | TableEvent::None => ScreenAction::None,
        };
        Ok(action)
    }

    fn help_text(&self) -> &'static str {
        "Customer Table:\n\
        ↑/↓ - Move row cursor, PgUp/PgDn - First/last row\n\
        ←/→ - Previous/next page\n\
        Home/End - First/last page\n\
        1-9 - Jump to page\n\
        / - Search (Enter/Esc to leave)\n\
        f - Toggle column filters (Tab cycles)\n\
        </> - Pick sort column, o - cycle sort\n\
        Space - Select row, a - Select page\n\
        Enter - Open row\n\
        v/e/x - View/Edit/Delete\n\
        c - Export CSV"
    }
}
