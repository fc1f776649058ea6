//! User interface components and views.
//!
//! This module contains all TUI rendering logic, including views for the route
//! table and the delivery dialogs, and reusable UI components.

mod components;
pub mod theme;
mod views;

pub use components::{
    centered_percent, centered_rect, highlight_text, render_context_help, Menu, MenuAction,
    MenuItem, Notification, NotificationKind, NotificationManager, TextInput,
};
pub use theme::{init_theme, load_theme};
pub use views::{
    ColumnSettingsAction, ColumnSettingsView, DeliveryAction, DeliveryFocus, DeliveryListView,
    HelpAction, HelpView, RouteAction, RouteTableView, RowSettingsAction, RowSettingsView,
};
