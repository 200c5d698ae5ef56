//! Row selection for the data table
//!
//! With a `row_key` field, selection follows records through paging,
//! sorting and filtering. Without one, rows are identified by their position
//! on the current page and the selection is dropped whenever the view
//! changes, so it can never silently move to different records.

use std::collections::BTreeSet;

use crate::models::Row;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SelectionKey {
    /// Position within the current page
    Position(usize),
    /// Stringified value of the row key field
    Id(String),
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    row_key: Option<String>,
    selected: BTreeSet<SelectionKey>,
}

impl Selection {
    pub fn new(row_key: Option<String>) -> Self {
        Self {
            row_key,
            selected: BTreeSet::new(),
        }
    }

    pub fn row_key(&self) -> Option<&str> {
        self.row_key.as_deref()
    }

    /// Identity of the row shown at `position` on the current page
    pub fn key_for(&self, position: usize, row: &Row) -> SelectionKey {
        match self.row_key {
            Some(ref field) => SelectionKey::Id(row.text(field)),
            None => SelectionKey::Position(position),
        }
    }

    pub fn is_selected(&self, key: &SelectionKey) -> bool {
        self.selected.contains(key)
    }

    pub fn toggle(&mut self, key: SelectionKey) {
        if !self.selected.remove(&key) {
            self.selected.insert(key);
        }
    }

    /// True when the page is non-empty and every row on it is selected
    pub fn all_selected(&self, page_keys: &[SelectionKey]) -> bool {
        !page_keys.is_empty() && page_keys.iter().all(|key| self.selected.contains(key))
    }

    /// Select every row on the page, or deselect them all when they
    /// already are.
    pub fn toggle_all(&mut self, page_keys: &[SelectionKey]) {
        if self.all_selected(page_keys) {
            for key in page_keys {
                self.selected.remove(key);
            }
        } else {
            self.selected.extend(page_keys.iter().cloned());
        }
    }

    /// Called whenever the page, sort, search or filters change
    pub fn on_view_changed(&mut self) {
        if self.row_key.is_none() {
            self.selected.clear();
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &SelectionKey> {
        self.selected.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_selection_cleared_on_view_change() {
        let mut selection = Selection::new(None);
        let row = Row::new().with("id", 7i64);
        let key = selection.key_for(1, &row);
        assert_eq!(key, SelectionKey::Position(1));

        selection.toggle(key.clone());
        assert!(selection.is_selected(&key));
        selection.on_view_changed();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_keyed_selection_survives_view_change() {
        let mut selection = Selection::new(Some("id".to_string()));
        let row = Row::new().with("id", 7i64);
        let key = selection.key_for(0, &row);
        assert_eq!(key, SelectionKey::Id("7".to_string()));

        selection.toggle(key.clone());
        selection.on_view_changed();
        assert!(selection.is_selected(&key));
        selection.toggle(key.clone());
        assert!(!selection.is_selected(&key));
    }

    #[test]
    fn test_toggle_all() {
        let mut selection = Selection::new(None);
        let page = vec![SelectionKey::Position(0), SelectionKey::Position(1)];

        selection.toggle(SelectionKey::Position(0));
        assert!(!selection.all_selected(&page));
        selection.toggle_all(&page);
        assert!(selection.all_selected(&page));
        assert_eq!(selection.len(), 2);
        selection.toggle_all(&page);
        assert!(selection.is_empty());

        assert!(!selection.all_selected(&[]));
    }
}
