//! Reusable terminal components
//!
//! `ValidatedInput` and `DataTable` are independent of each other and of
//! any host; the host owns datasets and controlled values and composes them.

pub mod data_table;
pub mod input_field;
pub mod status_display;

pub use data_table::{Column, DataTable, DataTableConfig, RowActions, TableEvent};
pub use input_field::{InputOutcome, InputType, ValidatedInput, ValueMode};
pub use status_display::{StatusDisplay, StatusKind};
