//! Terminal UI components: a validated input field and a queryable data
//! table, plus the demo and headless tools built on them.

pub mod cli;
pub mod components;
pub mod config;
pub mod demo;
pub mod errors;
pub mod models;
pub mod traits;
pub mod ui;
