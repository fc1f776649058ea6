//! Application views (screens and dialogs).

mod column_settings;
mod deliveries;
mod help;
mod routes;
mod row_settings;

pub use column_settings::{ColumnSettingsAction, ColumnSettingsView};
pub use deliveries::{DeliveryAction, DeliveryFocus, DeliveryListView};
pub use help::{HelpAction, HelpView};
pub use routes::{RouteAction, RouteTableView};
pub use row_settings::{RowSettingsAction, RowSettingsView};
