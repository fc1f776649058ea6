//! Column visibility and ordering for the delivery table.

use std::fmt;

/// A logical column of the delivery table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnField {
    No,
    Code,
    Location,
    Delivery,
    Action,
}

impl ColumnField {
    /// Get the default header text for this field.
    pub fn header(&self) -> &'static str {
        match self {
            ColumnField::No => "No",
            ColumnField::Code => "Code",
            ColumnField::Location => "Location",
            ColumnField::Delivery => "Delivery",
            ColumnField::Action => "Action",
        }
    }

    /// Get the field key (e.g., "location").
    pub fn key(&self) -> &'static str {
        match self {
            ColumnField::No => "no",
            ColumnField::Code => "code",
            ColumnField::Location => "location",
            ColumnField::Delivery => "delivery",
            ColumnField::Action => "action",
        }
    }

    /// Whether this column carries record data, as opposed to a display-only
    /// column like the row number or row actions.
    pub fn is_data(&self) -> bool {
        !matches!(self, ColumnField::No | ColumnField::Action)
    }
}

impl fmt::Display for ColumnField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Direction to move a column in the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// A column's header and visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub field: ColumnField,
    pub header: &'static str,
    pub visible: bool,
}

impl ColumnDescriptor {
    /// Create a visible descriptor with the field's default header.
    pub fn new(field: ColumnField) -> Self {
        Self {
            field,
            header: field.header(),
            visible: true,
        }
    }
}

/// The ordered column descriptors of the delivery table.
///
/// Exactly one descriptor exists per field. Only visibility and relative
/// order ever change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnManager {
    columns: Vec<ColumnDescriptor>,
}

impl ColumnManager {
    /// Create the default column set: No, Code, Location, Delivery, Action.
    pub fn new() -> Self {
        Self {
            columns: [
                ColumnField::No,
                ColumnField::Code,
                ColumnField::Location,
                ColumnField::Delivery,
                ColumnField::Action,
            ]
            .into_iter()
            .map(ColumnDescriptor::new)
            .collect(),
        }
    }

    /// Get all descriptors in order.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Get the number of descriptors.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if there are no descriptors.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over the visible descriptors in order.
    pub fn visible(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| c.visible)
    }

    /// Check whether a field is currently visible.
    pub fn is_visible(&self, field: ColumnField) -> bool {
        self.columns
            .iter()
            .any(|c| c.field == field && c.visible)
    }

    /// Flip the visibility of `field`. Order is untouched.
    pub fn toggle_visibility(&mut self, field: ColumnField) {
        if let Some(column) = self.columns.iter_mut().find(|c| c.field == field) {
            column.visible = !column.visible;
        }
    }

    /// Swap the column at `index` with its neighbour in `direction`.
    ///
    /// Returns the new index of the moved column, or `None` when the move
    /// would leave the sequence.
    pub fn move_column(&mut self, index: usize, direction: MoveDirection) -> Option<usize> {
        if index >= self.columns.len() {
            return None;
        }
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1)?,
            MoveDirection::Down => index + 1,
        };
        if target >= self.columns.len() {
            return None;
        }
        self.columns.swap(index, target);
        Some(target)
    }
}

impl Default for ColumnManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(manager: &ColumnManager) -> Vec<ColumnField> {
        manager.columns().iter().map(|c| c.field).collect()
    }

    #[test]
    fn test_default_columns() {
        let manager = ColumnManager::new();
        assert_eq!(
            fields(&manager),
            vec![
                ColumnField::No,
                ColumnField::Code,
                ColumnField::Location,
                ColumnField::Delivery,
                ColumnField::Action,
            ]
        );
        assert!(manager.columns().iter().all(|c| c.visible));
        assert_eq!(manager.columns()[2].header, "Location");
    }

    #[test]
    fn test_toggle_visibility_twice_restores() {
        let mut manager = ColumnManager::new();
        let original = manager.clone();

        manager.toggle_visibility(ColumnField::Location);
        assert!(!manager.is_visible(ColumnField::Location));
        assert_eq!(manager.visible().count(), 4);
        assert_eq!(fields(&manager), fields(&original));

        manager.toggle_visibility(ColumnField::Location);
        assert_eq!(manager, original);
    }

    #[test]
    fn test_move_column_down() {
        let mut manager = ColumnManager::new();
        assert_eq!(manager.move_column(1, MoveDirection::Down), Some(2));
        assert_eq!(fields(&manager)[1], ColumnField::Location);
        assert_eq!(fields(&manager)[2], ColumnField::Code);
    }

    #[test]
    fn test_move_column_up() {
        let mut manager = ColumnManager::new();
        assert_eq!(manager.move_column(4, MoveDirection::Up), Some(3));
        assert_eq!(fields(&manager)[3], ColumnField::Action);
        assert_eq!(fields(&manager)[4], ColumnField::Delivery);
    }

    #[test]
    fn test_move_column_bounds() {
        let mut manager = ColumnManager::new();
        let original = manager.clone();
        assert_eq!(manager.move_column(0, MoveDirection::Up), None);
        assert_eq!(manager.move_column(4, MoveDirection::Down), None);
        assert_eq!(manager.move_column(9, MoveDirection::Up), None);
        assert_eq!(manager, original);
    }

    #[test]
    fn test_visible_follows_order() {
        let mut manager = ColumnManager::new();
        manager.toggle_visibility(ColumnField::No);
        manager.move_column(3, MoveDirection::Up);
        let visible: Vec<ColumnField> = manager.visible().map(|c| c.field).collect();
        assert_eq!(
            visible,
            vec![
                ColumnField::Code,
                ColumnField::Delivery,
                ColumnField::Location,
                ColumnField::Action,
            ]
        );
    }

    #[test]
    fn test_is_data() {
        assert!(!ColumnField::No.is_data());
        assert!(ColumnField::Code.is_data());
        assert!(ColumnField::Location.is_data());
        assert!(ColumnField::Delivery.is_data());
        assert!(!ColumnField::Action.is_data());
    }
}
