//! Locked/unlocked route partitions.
//!
//! Locked routes are pinned to the top of the route table. At most
//! [`MAX_LOCKED`] routes can be locked at a time; unlocked routes are always
//! kept in ascending `id` order.

use tracing::debug;

use crate::data::Route;

/// Maximum number of routes that can be locked at once.
pub const MAX_LOCKED: usize = 2;

/// Why a toggle did not move a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleRejection {
    /// The locked partition is already full.
    LimitReached,
    /// There is no route at the given index.
    OutOfRange,
}

/// Result of toggling a route's lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The route with this id moved into the locked partition.
    Locked(u32),
    /// The route with this id moved back into the unlocked partition.
    Unlocked(u32),
    /// Nothing moved.
    Rejected(ToggleRejection),
}

/// Holds the locked and unlocked route partitions.
#[derive(Debug, Clone, Default)]
pub struct PartitionManager {
    locked: Vec<Route>,
    unlocked: Vec<Route>,
}

impl PartitionManager {
    /// Create a manager with every route unlocked.
    pub fn new(mut routes: Vec<Route>) -> Self {
        sort_unlocked(&mut routes);
        Self {
            locked: Vec::new(),
            unlocked: routes,
        }
    }

    /// Get the locked routes, in the order they were locked.
    pub fn locked(&self) -> &[Route] {
        &self.locked
    }

    /// Get the unlocked routes, ascending by id.
    pub fn unlocked(&self) -> &[Route] {
        &self.unlocked
    }

    /// Total number of routes across both partitions.
    pub fn len(&self) -> usize {
        self.locked.len() + self.unlocked.len()
    }

    /// Check if there are no routes at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if another route can be locked.
    pub fn can_lock(&self) -> bool {
        self.locked.len() < MAX_LOCKED
    }

    /// Get a route by its position in a partition.
    pub fn get(&self, locked: bool, index: usize) -> Option<&Route> {
        if locked {
            self.locked.get(index)
        } else {
            self.unlocked.get(index)
        }
    }

    /// Move the route at `index` to the other partition.
    ///
    /// `locked` says which partition `index` refers to. Locking is rejected
    /// when the locked partition is full.
    pub fn toggle(&mut self, locked: bool, index: usize) -> ToggleOutcome {
        let outcome = if locked {
            if index >= self.locked.len() {
                return ToggleOutcome::Rejected(ToggleRejection::OutOfRange);
            }
            let route = self.locked.remove(index);
            let id = route.id;
            self.unlocked.push(route);
            ToggleOutcome::Unlocked(id)
        } else {
            if !self.can_lock() {
                debug!(index, "Lock rejected, locked partition is full");
                return ToggleOutcome::Rejected(ToggleRejection::LimitReached);
            }
            if index >= self.unlocked.len() {
                return ToggleOutcome::Rejected(ToggleRejection::OutOfRange);
            }
            let route = self.unlocked.remove(index);
            let id = route.id;
            self.locked.push(route);
            ToggleOutcome::Locked(id)
        };

        sort_unlocked(&mut self.unlocked);
        debug!(?outcome, locked = self.locked.len(), "Route partition changed");
        outcome
    }
}

/// Route ids are unique, so a stable sort on the id gives the same order as
/// the legacy "less-than or after" comparison.
fn sort_unlocked(routes: &mut [Route]) {
    routes.sort_by_key(|route| route.id);
}
