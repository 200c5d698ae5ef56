//! Row-level actions (view / edit / delete / custom) for the data table

use std::fmt;

use crate::models::Row;

/// Callback receiving the full row
pub type RowCallback = Box<dyn FnMut(&Row)>;

/// Which action button was activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    View,
    Edit,
    Delete,
    /// Index into the custom action list
    Custom(usize),
}

pub struct CustomAction {
    pub label: String,
    on_click: RowCallback,
}

impl CustomAction {
    pub fn new<F: FnMut(&Row) + 'static>(label: &str, on_click: F) -> Self {
        Self {
            label: label.to_string(),
            on_click: Box::new(on_click),
        }
    }
}

#[derive(Default)]
pub struct RowActions {
    view: Option<RowCallback>,
    edit: Option<RowCallback>,
    delete: Option<RowCallback>,
    custom: Vec<CustomAction>,
}

impl fmt::Debug for RowActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowActions")
            .field("view", &self.view.is_some())
            .field("edit", &self.edit.is_some())
            .field("delete", &self.delete.is_some())
            .field("custom", &self.custom_labels())
            .finish()
    }
}

impl RowActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_view<F: FnMut(&Row) + 'static>(mut self, callback: F) -> Self {
        self.view = Some(Box::new(callback));
        self
    }

    pub fn on_edit<F: FnMut(&Row) + 'static>(mut self, callback: F) -> Self {
        self.edit = Some(Box::new(callback));
        self
    }

    pub fn on_delete<F: FnMut(&Row) + 'static>(mut self, callback: F) -> Self {
        self.delete = Some(Box::new(callback));
        self
    }

    pub fn with_custom(mut self, action: CustomAction) -> Self {
        self.custom.push(action);
        self
    }

    pub fn has(&self, action: RowAction) -> bool {
        match action {
            RowAction::View => self.view.is_some(),
            RowAction::Edit => self.edit.is_some(),
            RowAction::Delete => self.delete.is_some(),
            RowAction::Custom(i) => i < self.custom.len(),
        }
    }

    pub fn custom_labels(&self) -> Vec<&str> {
        self.custom.iter().map(|a| a.label.as_str()).collect()
    }

    /// Short button captions in display order, e.g. `v:View`
    pub fn button_labels(&self) -> Vec<String> {
        let mut labels = Vec::new();
        if self.view.is_some() {
            labels.push("v:View".to_string());
        }
        if self.edit.is_some() {
            labels.push("e:Edit".to_string());
        }
        if self.delete.is_some() {
            labels.push("x:Delete".to_string());
        }
        for (i, action) in self.custom.iter().enumerate() {
            labels.push(format!("F{}:{}", i + 2, action.label));
        }
        labels
    }

    /// Run the action's callback. Returns false when no such action exists.
    pub fn invoke(&mut self, action: RowAction, row: &Row) -> bool {
        let callback = match action {
            RowAction::View => self.view.as_mut(),
            RowAction::Edit => self.edit.as_mut(),
            RowAction::Delete => self.delete.as_mut(),
            RowAction::Custom(i) => self.custom.get_mut(i).map(|a| &mut a.on_click),
        };
        match callback {
            Some(callback) => {
                callback(row);
                true
            }
            None => false,
        }
    }
}
