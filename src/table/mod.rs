//! Table state: route partitions, delivery columns, search and row reordering.
//!
//! Everything here is plain state with `&mut self` transitions, so it can be
//! exercised without a terminal.

mod columns;
mod controller;
mod filter;
mod partition;
mod staging;

pub use columns::{ColumnDescriptor, ColumnField, ColumnManager, MoveDirection};
pub use controller::{TableController, MAX_ROW_COUNT, MIN_ROW_COUNT};
pub use filter::apply_filter;
pub use partition::{PartitionManager, ToggleOutcome, ToggleRejection, MAX_LOCKED};
pub use staging::{ReorderStaging, StagingSession};
