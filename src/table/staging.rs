//! Staged manual reordering of delivery rows.
//!
//! Opening a staging session snapshots the filtered deliveries into a scratch
//! copy. Each row can hold a pending target position typed by the user; when
//! the row's field is committed the row moves in the scratch copy. Nothing
//! touches the canonical set until [`ReorderStaging::apply`].

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::data::{renumber, Delivery};

/// An active reorder session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingSession {
    /// Working copy of the deliveries being reordered.
    scratch: Vec<Delivery>,
    /// Pending position text, keyed by current row index.
    pending: BTreeMap<usize, String>,
}

impl StagingSession {
    /// Get the scratch rows in their current order.
    pub fn rows(&self) -> &[Delivery] {
        &self.scratch
    }

    /// Get the pending position text for a row.
    pub fn pending(&self, row: usize) -> Option<&str> {
        self.pending.get(&row).map(String::as_str)
    }

    /// Number of rows with pending text.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Parse pending text into a zero-based target index.
    ///
    /// Returns `None` for empty, non-numeric or out-of-range text.
    fn target_index(&self, text: &str) -> Option<usize> {
        let position: usize = text.trim().parse().ok()?;
        if position < 1 || position > self.scratch.len() {
            return None;
        }
        Some(position - 1)
    }
}

/// Row reorder state machine: idle, or staging edits on a scratch copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReorderStaging {
    #[default]
    Idle,
    Staging(StagingSession),
}

impl ReorderStaging {
    /// Create an idle state.
    pub fn new() -> Self {
        Self::Idle
    }

    /// Check if a session is open.
    pub fn is_staging(&self) -> bool {
        matches!(self, ReorderStaging::Staging(_))
    }

    /// Get the open session, if any.
    pub fn session(&self) -> Option<&StagingSession> {
        match self {
            ReorderStaging::Staging(session) => Some(session),
            ReorderStaging::Idle => None,
        }
    }

    fn session_mut(&mut self) -> Option<&mut StagingSession> {
        match self {
            ReorderStaging::Staging(session) => Some(session),
            ReorderStaging::Idle => None,
        }
    }

    /// Open a session on a copy of `rows`. Replaces any open session.
    pub fn open(&mut self, rows: &[Delivery]) {
        debug!(rows = rows.len(), "Opening row reorder staging");
        *self = ReorderStaging::Staging(StagingSession {
            scratch: rows.to_vec(),
            pending: BTreeMap::new(),
        });
    }

    /// Set the pending position text for `row`. Ignored when idle or out of range.
    pub fn set_pending(&mut self, row: usize, text: impl Into<String>) {
        if let Some(session) = self.session_mut() {
            if row < session.scratch.len() {
                session.pending.insert(row, text.into());
            }
        }
    }

    /// Append a character to the pending text of `row`.
    pub fn push_pending(&mut self, row: usize, c: char) {
        if let Some(session) = self.session_mut() {
            if row < session.scratch.len() {
                session.pending.entry(row).or_default().push(c);
            }
        }
    }

    /// Remove the last character of the pending text of `row`.
    pub fn pop_pending(&mut self, row: usize) {
        if let Some(session) = self.session_mut() {
            if let Some(text) = session.pending.get_mut(&row) {
                text.pop();
                if text.is_empty() {
                    session.pending.remove(&row);
                }
            }
        }
    }

    /// Commit the pending position of `row`, moving it in the scratch copy.
    ///
    /// Invalid or out-of-range text is ignored, as is a target equal to the
    /// row's current position. After a move every pending text is cleared,
    /// since the indices they were typed against no longer hold.
    ///
    /// Returns the row's new index when it moved.
    pub fn commit_position(&mut self, row: usize) -> Option<usize> {
        let session = self.session_mut()?;
        let text = session.pending.get(&row)?;
        let Some(target) = session.target_index(text) else {
            trace!(row, text = %text, "Ignoring invalid reorder position");
            return None;
        };
        if target == row {
            return None;
        }

        let item = session.scratch.remove(row);
        session.scratch.insert(target, item);
        session.pending.clear();
        debug!(from = row, to = target, "Moved staged row");
        Some(target)
    }

    /// Close the session and return the reordered rows with `no` renumbered.
    ///
    /// Returns `None` when no session was open.
    pub fn apply(&mut self) -> Option<Vec<Delivery>> {
        match std::mem::take(self) {
            ReorderStaging::Staging(session) => {
                let mut rows = session.scratch;
                renumber(&mut rows);
                debug!(rows = rows.len(), "Applied row order");
                Some(rows)
            }
            ReorderStaging::Idle => None,
        }
    }

    /// Discard the session without touching anything else.
    pub fn cancel(&mut self) {
        if self.is_staging() {
            debug!("Cancelled row reorder staging");
        }
        *self = ReorderStaging::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Frequency;

    fn rows(count: u32) -> Vec<Delivery> {
        (0..count)
            .map(|i| Delivery::new(i as usize + 1, 40 + i, "KPJ Ipoh", Frequency::Daily))
            .collect()
    }

    fn codes(staging: &ReorderStaging) -> Vec<u32> {
        staging
            .session()
            .map(|s| s.rows().iter().map(|d| d.code).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_starts_idle() {
        let staging = ReorderStaging::new();
        assert!(!staging.is_staging());
        assert!(staging.session().is_none());
    }

    #[test]
    fn test_open_snapshots_rows() {
        let source = rows(3);
        let mut staging = ReorderStaging::new();
        staging.open(&source);
        assert!(staging.is_staging());
        assert_eq!(staging.session().unwrap().rows(), source.as_slice());
    }

    #[test]
    fn test_move_row_to_front() {
        let mut staging = ReorderStaging::new();
        staging.open(&rows(5));
        staging.set_pending(3, "1");

        assert_eq!(staging.commit_position(3), Some(0));
        assert_eq!(codes(&staging), vec![43, 40, 41, 42, 44]);

        let applied = staging.apply().unwrap();
        let codes: Vec<u32> = applied.iter().map(|d| d.code).collect();
        let numbers: Vec<usize> = applied.iter().map(|d| d.no).collect();
        assert_eq!(codes, vec![43, 40, 41, 42, 44]);
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert!(!staging.is_staging());
    }

    #[test]
    fn test_move_row_to_back() {
        let mut staging = ReorderStaging::new();
        staging.open(&rows(4));
        staging.set_pending(0, " 4 ");
        assert_eq!(staging.commit_position(0), Some(3));
        assert_eq!(codes(&staging), vec![41, 42, 43, 40]);
    }

    #[test]
    fn test_same_position_is_noop() {
        let mut staging = ReorderStaging::new();
        staging.open(&rows(4));
        staging.set_pending(2, "3");
        assert_eq!(staging.commit_position(2), None);
        assert_eq!(codes(&staging), vec![40, 41, 42, 43]);
        // The pending text stays since nothing moved
        assert_eq!(staging.session().unwrap().pending(2), Some("3"));
    }

    #[test]
    fn test_invalid_positions_ignored() {
        let mut staging = ReorderStaging::new();
        staging.open(&rows(4));
        for text in ["", "0", "5", "-1", "abc", "2.5"] {
            staging.set_pending(1, text);
            assert_eq!(staging.commit_position(1), None, "text {:?}", text);
            assert_eq!(codes(&staging), vec![40, 41, 42, 43]);
        }
    }

    #[test]
    fn test_commit_without_pending_is_noop() {
        let mut staging = ReorderStaging::new();
        staging.open(&rows(3));
        assert_eq!(staging.commit_position(1), None);
    }

    #[test]
    fn test_move_clears_all_pending() {
        let mut staging = ReorderStaging::new();
        staging.open(&rows(5));
        staging.set_pending(1, "5");
        staging.set_pending(4, "1");
        assert_eq!(staging.session().unwrap().pending_count(), 2);

        staging.commit_position(4);
        assert_eq!(codes(&staging), vec![44, 40, 41, 42, 43]);
        assert_eq!(staging.session().unwrap().pending_count(), 0);

        // The stale entry for row 1 can no longer be applied
        assert_eq!(staging.commit_position(1), None);
        assert_eq!(codes(&staging), vec![44, 40, 41, 42, 43]);
    }

    #[test]
    fn test_push_and_pop_pending() {
        let mut staging = ReorderStaging::new();
        staging.open(&rows(12));
        staging.push_pending(0, '1');
        staging.push_pending(0, '2');
        assert_eq!(staging.session().unwrap().pending(0), Some("12"));
        staging.pop_pending(0);
        assert_eq!(staging.session().unwrap().pending(0), Some("1"));
        staging.pop_pending(0);
        assert_eq!(staging.session().unwrap().pending(0), None);
    }

    #[test]
    fn test_pending_ignored_when_idle() {
        let mut staging = ReorderStaging::new();
        staging.set_pending(0, "1");
        staging.push_pending(0, '1');
        assert!(staging.session().is_none());
        assert_eq!(staging.commit_position(0), None);
        assert!(staging.apply().is_none());
    }

    #[test]
    fn test_pending_out_of_range_row_ignored() {
        let mut staging = ReorderStaging::new();
        staging.open(&rows(2));
        staging.set_pending(5, "1");
        assert_eq!(staging.session().unwrap().pending_count(), 0);
    }

    #[test]
    fn test_apply_preserves_cardinality() {
        let mut staging = ReorderStaging::new();
        staging.open(&rows(6));
        staging.set_pending(5, "2");
        staging.commit_position(5);
        staging.set_pending(0, "6");
        staging.commit_position(0);

        let applied = staging.apply().unwrap();
        assert_eq!(applied.len(), 6);
        let mut codes: Vec<u32> = applied.iter().map(|d| d.code).collect();
        codes.sort();
        assert_eq!(codes, vec![40, 41, 42, 43, 44, 45]);
        for (index, delivery) in applied.iter().enumerate() {
            assert_eq!(delivery.no, index + 1);
        }
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut staging = ReorderStaging::new();
        staging.open(&rows(3));
        staging.set_pending(2, "1");
        staging.commit_position(2);
        staging.cancel();
        assert_eq!(staging, ReorderStaging::Idle);
        assert!(staging.apply().is_none());
    }
}
