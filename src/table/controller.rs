//! The table view controller.
//!
//! Owns all table state and exposes render-ready data. The presentation layer
//! reads through the accessors and forwards user gestures to the transition
//! methods; no other code mutates the state.

use tracing::{debug, info};

use crate::data::{DataSource, Delivery, Route};

use super::columns::{ColumnDescriptor, ColumnField, ColumnManager, MoveDirection};
use super::filter::apply_filter;
use super::partition::{PartitionManager, ToggleOutcome};
use super::staging::{ReorderStaging, StagingSession};

/// Smallest accepted delivery row count.
pub const MIN_ROW_COUNT: usize = 1;
/// Largest accepted delivery row count.
pub const MAX_ROW_COUNT: usize = 1000;

/// State behind the route table and the delivery list.
pub struct TableController {
    /// Where regenerated deliveries come from.
    source: Box<dyn DataSource>,
    /// Locked and unlocked routes.
    partitions: PartitionManager,
    /// Delivery table columns.
    columns: ColumnManager,
    /// The route whose deliveries are open, if any.
    detail_route: Option<Route>,
    /// Canonical delivery set of the open detail view.
    deliveries: Vec<Delivery>,
    /// `deliveries` narrowed by `query`.
    filtered: Vec<Delivery>,
    /// Current search text.
    query: String,
    /// Last accepted row count.
    row_count: usize,
    /// Row count field contents, kept verbatim even when invalid.
    row_input: String,
    /// Row reorder staging.
    staging: ReorderStaging,
}

impl TableController {
    /// Build the controller from a data source.
    ///
    /// Generates `route_count` routes and pins the first one, matching the
    /// initial layout of the route table.
    pub fn new(mut source: Box<dyn DataSource>, route_count: usize, row_count: usize) -> Self {
        let routes = source.routes(route_count);
        let mut partitions = PartitionManager::new(routes);
        if !partitions.is_empty() {
            partitions.toggle(false, 0);
        }

        let row_count = row_count.clamp(MIN_ROW_COUNT, MAX_ROW_COUNT);
        info!(routes = partitions.len(), row_count, "Table controller ready");

        Self {
            source,
            partitions,
            columns: ColumnManager::new(),
            detail_route: None,
            deliveries: Vec::new(),
            filtered: Vec::new(),
            query: String::new(),
            row_count,
            row_input: row_count.to_string(),
            staging: ReorderStaging::new(),
        }
    }

    // ========================================================================
    // Routes
    // ========================================================================

    /// Get the pinned routes.
    pub fn locked_routes(&self) -> &[Route] {
        self.partitions.locked()
    }

    /// Get the unpinned routes, ascending by id.
    pub fn unlocked_routes(&self) -> &[Route] {
        self.partitions.unlocked()
    }

    /// Total number of routes.
    pub fn route_count(&self) -> usize {
        self.partitions.len()
    }

    /// Check if another route can be pinned.
    pub fn can_lock(&self) -> bool {
        self.partitions.can_lock()
    }

    /// Pin or unpin a route.
    ///
    /// `locked` says which partition `index` refers to.
    pub fn toggle_lock(&mut self, locked: bool, index: usize) -> ToggleOutcome {
        self.partitions.toggle(locked, index)
    }

    // ========================================================================
    // Delivery detail view
    // ========================================================================

    /// Open the delivery list of a route.
    ///
    /// The route's deliveries become the canonical detail set and the search
    /// query is cleared. Returns `false` when there is no such route.
    pub fn open_route(&mut self, locked: bool, index: usize) -> bool {
        let Some(route) = self.partitions.get(locked, index).cloned() else {
            return false;
        };
        debug!(route_id = route.id, "Opening delivery list");

        self.staging.cancel();
        self.deliveries = route.deliveries.clone();
        self.query.clear();
        self.detail_route = Some(route);
        self.refresh_filter();
        true
    }

    /// Get the route whose deliveries are open.
    pub fn detail_route(&self) -> Option<&Route> {
        self.detail_route.as_ref()
    }

    /// Get the canonical detail set.
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    /// Get the deliveries matching the current query.
    pub fn filtered(&self) -> &[Delivery] {
        &self.filtered
    }

    /// Get the current search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the search query and refilter the current detail set.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refresh_filter();
    }

    /// Recompute the filtered view from the stored source and query.
    ///
    /// Every change to either input goes through here.
    fn refresh_filter(&mut self) {
        self.filtered = apply_filter(&self.query, &self.deliveries);
        debug!(
            query = %self.query,
            total = self.deliveries.len(),
            shown = self.filtered.len(),
            "Delivery filter refreshed"
        );
    }

    // ========================================================================
    // Columns
    // ========================================================================

    /// Get every column descriptor in order.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        self.columns.columns()
    }

    /// Get the visible column descriptors in order.
    pub fn visible_columns(&self) -> Vec<&ColumnDescriptor> {
        self.columns.visible().collect()
    }

    /// Flip a column's visibility.
    pub fn toggle_column_visibility(&mut self, field: ColumnField) {
        self.columns.toggle_visibility(field);
    }

    /// Move a column one step. Returns its new index when it moved.
    pub fn move_column(&mut self, index: usize, direction: MoveDirection) -> Option<usize> {
        self.columns.move_column(index, direction)
    }

    // ========================================================================
    // Row count
    // ========================================================================

    /// Get the last accepted row count.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Get the row count field contents.
    pub fn row_input(&self) -> &str {
        &self.row_input
    }

    /// Regenerate the detail set with `count` rows.
    ///
    /// Counts outside `[MIN_ROW_COUNT, MAX_ROW_COUNT]` are ignored. Returns
    /// whether the set was regenerated.
    pub fn set_row_count(&mut self, count: usize) -> bool {
        if !(MIN_ROW_COUNT..=MAX_ROW_COUNT).contains(&count) {
            debug!(count, "Ignoring out-of-range row count");
            return false;
        }
        self.row_input = count.to_string();
        self.regenerate(count);
        true
    }

    /// Update the row count field.
    ///
    /// The text is kept as typed; the set is regenerated only when it parses
    /// to an accepted row count.
    pub fn set_row_input(&mut self, text: impl Into<String>) -> bool {
        self.row_input = text.into();
        match self.row_input.trim().parse::<usize>() {
            Ok(count) if (MIN_ROW_COUNT..=MAX_ROW_COUNT).contains(&count) => {
                self.regenerate(count);
                true
            }
            _ => {
                debug!(input = %self.row_input, "Row count input not applied");
                false
            }
        }
    }

    /// Step the row count by one in `direction` (Up adds a row) and regenerate.
    pub fn adjust_row_count(&mut self, direction: MoveDirection) {
        let count = match direction {
            MoveDirection::Up => self.row_count.saturating_add(1),
            MoveDirection::Down => self.row_count.saturating_sub(1),
        }
        .clamp(MIN_ROW_COUNT, MAX_ROW_COUNT);
        self.set_row_count(count);
    }

    fn regenerate(&mut self, count: usize) {
        info!(count, "Regenerating deliveries");
        self.staging.cancel();
        self.row_count = count;
        let mut deliveries = self.source.deliveries(count);
        deliveries.sort_by_key(|d| d.code);
        crate::data::renumber(&mut deliveries);
        self.deliveries = deliveries;
        self.refresh_filter();
    }

    // ========================================================================
    // Row reorder staging
    // ========================================================================

    /// Get the open staging session, if any.
    pub fn staging(&self) -> Option<&StagingSession> {
        self.staging.session()
    }

    /// Check if a staging session is open.
    pub fn is_staging(&self) -> bool {
        self.staging.is_staging()
    }

    /// Start reordering a copy of the filtered deliveries.
    pub fn open_staging(&mut self) {
        self.staging.open(&self.filtered);
    }

    /// Append a character to a staged row's position text.
    pub fn push_position_char(&mut self, row: usize, c: char) {
        self.staging.push_pending(row, c);
    }

    /// Remove the last character of a staged row's position text.
    pub fn pop_position_char(&mut self, row: usize) {
        self.staging.pop_pending(row);
    }

    /// Replace a staged row's position text.
    pub fn set_position(&mut self, row: usize, text: impl Into<String>) {
        self.staging.set_pending(row, text);
    }

    /// Commit a staged row's position text. Returns the row's new index when it moved.
    pub fn commit_position(&mut self, row: usize) -> Option<usize> {
        self.staging.commit_position(row)
    }

    /// Apply the staged order to the detail set.
    ///
    /// The reordered rows replace both the canonical set and the filtered
    /// view. Returns `false` when no session was open.
    pub fn apply_staging(&mut self) -> bool {
        let Some(rows) = self.staging.apply() else {
            return false;
        };
        self.filtered = rows.clone();
        self.deliveries = rows;
        true
    }

    /// Discard the staged order.
    pub fn cancel_staging(&mut self) {
        self.staging.cancel();
    }
}

impl std::fmt::Debug for TableController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableController")
            .field("partitions", &self.partitions)
            .field("columns", &self.columns)
            .field("deliveries", &self.deliveries.len())
            .field("filtered", &self.filtered.len())
            .field("query", &self.query)
            .field("row_count", &self.row_count)
            .field("staging", &self.staging.is_staging())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Frequency, MockDataSource, Shift};
    use crate::table::MAX_LOCKED;

    /// Data source with fixed, known records.
    struct FixedSource;

    fn fixed_deliveries(count: usize) -> Vec<Delivery> {
        let frequencies = [Frequency::Daily, Frequency::Weekly, Frequency::Monthly];
        (0..count)
            .map(|i| {
                Delivery::new(
                    i + 1,
                    40 + i as u32,
                    format!("Stop {}", i),
                    frequencies[i % 3],
                )
            })
            .collect()
    }

    impl DataSource for FixedSource {
        fn routes(&mut self, count: usize) -> Vec<Route> {
            (0..count)
                .map(|i| Route {
                    id: i as u32 + 1,
                    route: format!("KL {}", i + 7),
                    warehouse: "3pvk04".to_string(),
                    shift: Shift::Pm,
                    deliveries: fixed_deliveries(6),
                })
                .collect()
        }

        fn deliveries(&mut self, count: usize) -> Vec<Delivery> {
            // Out of order on purpose; the controller sorts by code
            let mut rows = fixed_deliveries(count);
            rows.reverse();
            rows
        }
    }

    fn controller() -> TableController {
        TableController::new(Box::new(FixedSource), 5, 20)
    }

    fn codes(rows: &[Delivery]) -> Vec<u32> {
        rows.iter().map(|d| d.code).collect()
    }

    #[test]
    fn test_new_pins_first_route() {
        let table = controller();
        assert_eq!(table.locked_routes().len(), 1);
        assert_eq!(table.locked_routes()[0].id, 1);
        let ids: Vec<u32> = table.unlocked_routes().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 4, 5]);
        assert_eq!(table.route_count(), 5);
        assert!(table.filtered().is_empty());
        assert_eq!(table.row_input(), "20");
    }

    #[test]
    fn test_new_with_no_routes() {
        let table = TableController::new(Box::new(FixedSource), 0, 20);
        assert_eq!(table.route_count(), 0);
        assert!(table.locked_routes().is_empty());
    }

    #[test]
    fn test_lock_cap_through_controller() {
        let mut table = controller();
        table.toggle_lock(false, 0);
        assert!(!table.can_lock());
        table.toggle_lock(false, 0);
        assert_eq!(table.locked_routes().len(), MAX_LOCKED);
    }

    #[test]
    fn test_open_route_loads_deliveries() {
        let mut table = controller();
        table.set_query("stop");
        assert!(table.open_route(false, 1));
        assert_eq!(table.detail_route().map(|r| r.id), Some(3));
        assert_eq!(table.query(), "");
        assert_eq!(table.filtered().len(), 6);
        assert_eq!(table.deliveries(), table.filtered());
    }

    #[test]
    fn test_open_missing_route() {
        let mut table = controller();
        assert!(!table.open_route(true, 3));
        assert!(table.detail_route().is_none());
    }

    #[test]
    fn test_query_week_over_six_rows() {
        let mut table = controller();
        table.open_route(true, 0);
        table.set_query("week");
        assert_eq!(table.filtered().len(), 2);
        assert!(table
            .filtered()
            .iter()
            .all(|d| d.delivery == Frequency::Weekly));
        // Clearing the query restores the whole set
        table.set_query("");
        assert_eq!(table.filtered(), table.deliveries());
    }

    #[test]
    fn test_row_count_rejections() {
        let mut table = controller();
        table.open_route(true, 0);
        let before = table.deliveries().to_vec();

        assert!(!table.set_row_count(0));
        assert_eq!(table.deliveries(), before.as_slice());
        assert!(!table.set_row_count(1500));
        assert_eq!(table.deliveries(), before.as_slice());
        assert_eq!(table.row_count(), 20);
    }

    #[test]
    fn test_row_count_regenerates_sorted() {
        let mut table = controller();
        assert!(table.set_row_count(250));
        assert_eq!(table.deliveries().len(), 250);
        assert_eq!(table.row_count(), 250);
        assert_eq!(table.row_input(), "250");
        let codes = codes(table.deliveries());
        let mut sorted = codes.clone();
        sorted.sort();
        assert_eq!(codes, sorted);
        for (index, delivery) in table.deliveries().iter().enumerate() {
            assert_eq!(delivery.no, index + 1);
        }
    }

    #[test]
    fn test_regeneration_keeps_query() {
        let mut table = controller();
        table.open_route(true, 0);
        table.set_query("monthly");
        table.set_row_count(9);
        assert_eq!(table.query(), "monthly");
        assert_eq!(table.filtered().len(), 3);
        assert_eq!(codes(table.filtered()), vec![42, 45, 48]);
    }

    #[test]
    fn test_row_input_kept_verbatim() {
        let mut table = controller();
        table.set_row_count(10);

        assert!(!table.set_row_input("abc"));
        assert_eq!(table.row_input(), "abc");
        assert_eq!(table.row_count(), 10);
        assert_eq!(table.deliveries().len(), 10);

        assert!(!table.set_row_input("1001"));
        assert_eq!(table.row_input(), "1001");
        assert_eq!(table.deliveries().len(), 10);

        assert!(!table.set_row_input(""));
        assert_eq!(table.deliveries().len(), 10);

        assert!(table.set_row_input("12"));
        assert_eq!(table.row_input(), "12");
        assert_eq!(table.deliveries().len(), 12);
    }

    #[test]
    fn test_adjust_row_count() {
        let mut table = TableController::new(Box::new(FixedSource), 1, 2);
        table.adjust_row_count(MoveDirection::Up);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.row_input(), "3");
        assert_eq!(table.deliveries().len(), 3);

        table.adjust_row_count(MoveDirection::Down);
        table.adjust_row_count(MoveDirection::Down);
        table.adjust_row_count(MoveDirection::Down);
        assert_eq!(table.row_count(), 1);

        table.set_row_count(MAX_ROW_COUNT);
        table.adjust_row_count(MoveDirection::Up);
        assert_eq!(table.row_count(), MAX_ROW_COUNT);
    }

    #[test]
    fn test_staging_apply_replaces_sets() {
        let mut table = controller();
        table.set_row_count(5);
        table.open_staging();
        table.set_position(3, "1");
        assert_eq!(table.commit_position(3), Some(0));

        // Canonical state is untouched until apply
        assert_eq!(codes(table.deliveries()), vec![40, 41, 42, 43, 44]);

        assert!(table.apply_staging());
        assert!(!table.is_staging());
        assert_eq!(codes(table.deliveries()), vec![43, 40, 41, 42, 44]);
        assert_eq!(table.filtered(), table.deliveries());
        let numbers: Vec<usize> = table.deliveries().iter().map(|d| d.no).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_staging_cancel_leaves_state() {
        let mut table = controller();
        table.open_route(true, 0);
        table.set_query("a");
        let deliveries = table.deliveries().to_vec();
        let filtered = table.filtered().to_vec();

        table.open_staging();
        table.push_position_char(0, '2');
        table.commit_position(0);
        table.cancel_staging();

        assert!(!table.is_staging());
        assert_eq!(table.deliveries(), deliveries.as_slice());
        assert_eq!(table.filtered(), filtered.as_slice());
    }

    #[test]
    fn test_staging_snapshots_filtered_view() {
        let mut table = controller();
        table.open_route(true, 0);
        table.set_query("daily");
        table.open_staging();
        let session = table.staging().unwrap();
        assert_eq!(session.rows(), table.filtered());
        assert_eq!(session.rows().len(), 2);
    }

    #[test]
    fn test_regenerate_cancels_staging() {
        let mut table = controller();
        table.set_row_count(4);
        table.open_staging();
        table.set_row_count(6);
        assert!(!table.is_staging());
        assert!(!table.apply_staging());
        assert_eq!(table.deliveries().len(), 6);
    }

    #[test]
    fn test_columns_through_controller() {
        let mut table = controller();
        table.toggle_column_visibility(ColumnField::Location);
        assert_eq!(table.visible_columns().len(), 4);
        assert_eq!(table.move_column(0, MoveDirection::Down), Some(1));
        assert_eq!(table.columns()[0].field, ColumnField::Code);
    }

    #[test]
    fn test_with_mock_source() {
        let mut table = TableController::new(Box::new(MockDataSource::seeded(5)), 10, 20);
        assert_eq!(table.route_count(), 10);
        assert!(table.open_route(true, 0));
        assert!(!table.filtered().is_empty());
        assert!(table.set_row_count(250));
        assert_eq!(table.filtered().len(), 250);
    }
}
