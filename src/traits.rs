//! Core traits shared by the components and the demo screens
//!
//! These mirror the interaction patterns every widget needs (a row cursor,
//! page navigation, a drawable screen) so that key handling reads the same
//! everywhere.

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Actions that can be returned from screen event handling
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenAction {
    /// Quit the application
    Quit,
    /// Set status message
    SetStatus(String),
    /// Set error message
    SetError(String),
    /// No action taken
    None,
}

/// Core trait for all demo screens
pub trait Screen {
    /// Draw the screen content
    fn draw(&mut self, f: &mut Frame, area: Rect);

    /// Handle keyboard input and return an action for the app
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<ScreenAction>;

    /// Key hints shown in the help popup
    fn help_text(&self) -> &'static str;
}

/// Trait for widgets with a navigable row cursor
pub trait Navigable {
    /// Move selection up
    fn navigate_up(&mut self);

    /// Move selection down
    fn navigate_down(&mut self);

    /// Get currently selected index
    fn get_selected_index(&self) -> Option<usize>;

    /// Set selected index
    fn set_selected_index(&mut self, index: Option<usize>);

    /// Get total number of items
    fn get_item_count(&self) -> usize;

    /// Navigate to first item
    fn navigate_to_first(&mut self) {
        if self.get_item_count() > 0 {
            self.set_selected_index(Some(0));
        }
    }

    /// Navigate to last item
    fn navigate_to_last(&mut self) {
        let count = self.get_item_count();
        if count > 0 {
            self.set_selected_index(Some(count - 1));
        }
    }
}

/// Trait for widgets with paginated content.
///
/// Pages are 1-based; there is always at least one page, even when empty.
pub trait Paginated {
    /// Get current page number (1-based)
    fn get_current_page(&self) -> usize;

    /// Set current page, clamped into the valid range
    fn set_current_page(&mut self, page: usize);

    /// Get total number of pages
    fn get_total_pages(&self) -> usize;

    /// Get items per page
    fn get_items_per_page(&self) -> usize;

    /// Go to next page
    fn next_page(&mut self) {
        let current = self.get_current_page();
        if current < self.get_total_pages() {
            self.set_current_page(current + 1);
        }
    }

    /// Go to previous page
    fn previous_page(&mut self) {
        let current = self.get_current_page();
        if current > 1 {
            self.set_current_page(current - 1);
        }
    }

    /// Go to first page
    fn go_to_first_page(&mut self) {
        self.set_current_page(1);
    }

    /// Go to last page
    fn go_to_last_page(&mut self) {
        let total = self.get_total_pages();
        self.set_current_page(total.max(1));
    }
}
