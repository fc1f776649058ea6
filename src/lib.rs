//! Mappmarker - a terminal route and delivery browser.
//!
//! The table state lives in [`table::TableController`], which is independent of
//! the terminal and can be driven directly from tests. The [`app`] module wires
//! the controller to key events and the [`ui`] module renders it with ratatui.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod logging;
pub mod table;
pub mod ui;
