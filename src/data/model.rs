//! Route and delivery record types.

use std::fmt;

/// The shift a route runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shift {
    /// Morning shift.
    Am,
    /// Afternoon shift.
    Pm,
    /// Night shift.
    Night,
}

impl Shift {
    /// All shifts, in display order.
    pub const ALL: [Shift; 3] = [Shift::Am, Shift::Pm, Shift::Night];

    /// Get the display label for this shift.
    pub fn label(&self) -> &'static str {
        match self {
            Shift::Am => "AM",
            Shift::Pm => "PM",
            Shift::Night => "Night",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How often a delivery is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// All frequencies, in display order.
    pub const ALL: [Frequency; 3] = [Frequency::Daily, Frequency::Weekly, Frequency::Monthly];

    /// Get the display label for this frequency.
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single drop-off on a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// 1-based display position. Recomputed whenever the set is rearranged.
    pub no: usize,
    /// The delivery code. Unique within one delivery set.
    pub code: u32,
    /// The drop-off location name.
    pub location: String,
    /// How often the drop-off is served.
    pub delivery: Frequency,
}

impl Delivery {
    /// Create a new delivery.
    pub fn new(no: usize, code: u32, location: impl Into<String>, delivery: Frequency) -> Self {
        Self {
            no,
            code,
            location: location.into(),
            delivery,
        }
    }
}

/// A delivery route with its own set of deliveries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Unique route id. The unlocked route table is ordered by it.
    pub id: u32,
    /// The route name (e.g., "KL 7").
    pub route: String,
    /// The warehouse the route departs from.
    pub warehouse: String,
    /// The shift the route runs in.
    pub shift: Shift,
    /// Deliveries served by this route.
    pub deliveries: Vec<Delivery>,
}

impl Route {
    /// Get a one-line description used in dialog titles.
    ///
    /// Formatted as `KL 7 (3pvk04, PM)`.
    pub fn describe(&self) -> String {
        format!("{} ({}, {})", self.route, self.warehouse, self.shift)
    }
}

/// Reassign `no` to the 1-based position of every delivery.
pub fn renumber(deliveries: &mut [Delivery]) {
    for (index, delivery) in deliveries.iter_mut().enumerate() {
        delivery.no = index + 1;
    }
}
