//! Randomly generated route and delivery data.
//!
//! The table never talks to a backend. All records come from a [`DataSource`],
//! and the production source draws them from fixed name pools with `rand`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::model::{renumber, Delivery, Frequency, Route, Shift};

/// Code assigned to the first delivery of a generated set.
pub const FIRST_DELIVERY_CODE: u32 = 40;

const ROUTE_NAMES: [&str; 6] = ["KL 7", "KL 8", "KL 9", "KL 10", "KL 11", "KL 12"];
const WAREHOUSES: [&str; 5] = ["3pvk04", "3pvk05", "3pvk06", "3pvk07", "3pvk08"];
const LOCATIONS: [&str; 8] = [
    "KPJ Damansara",
    "KPJ Ampang",
    "KPJ Seremban",
    "KPJ Ipoh",
    "KPJ Johor",
    "KPJ Penang",
    "KPJ Rawang",
    "KPJ Klang",
];

/// Minimum number of deliveries generated per route.
const MIN_ROUTE_DELIVERIES: usize = 5;
/// Maximum number of deliveries generated per route.
const MAX_ROUTE_DELIVERIES: usize = 10;

/// A source of route and delivery records.
///
/// Implementations are treated as synchronous and side-effect free by the
/// table controller; they are parameterized only by the number of records.
pub trait DataSource {
    /// Produce `count` routes with ids `1..=count`, each with its own deliveries.
    fn routes(&mut self, count: usize) -> Vec<Route>;

    /// Produce a flat set of `count` deliveries with sequential codes.
    fn deliveries(&mut self, count: usize) -> Vec<Delivery>;
}

/// Data source producing random records from fixed name pools.
#[derive(Debug, Clone)]
pub struct MockDataSource {
    rng: StdRng,
}

impl MockDataSource {
    /// Create a data source seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a data source with a fixed seed, for reproducible data.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick<T: Copy>(&mut self, pool: &[T]) -> T {
        pool[self.rng.random_range(0..pool.len())]
    }

    fn delivery(&mut self, no: usize, code: u32) -> Delivery {
        let location = self.pick(&LOCATIONS);
        let frequency = self.pick(&Frequency::ALL);
        Delivery::new(no, code, location, frequency)
    }
}

impl Default for MockDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSource for MockDataSource {
    fn routes(&mut self, count: usize) -> Vec<Route> {
        debug!(count, "Generating routes");
        (0..count)
            .map(|i| {
                let delivery_count = self
                    .rng
                    .random_range(MIN_ROUTE_DELIVERIES..=MAX_ROUTE_DELIVERIES);
                // Each route owns a block of ten codes so codes stay unique per route
                let base = FIRST_DELIVERY_CODE + (i as u32) * 10;
                let deliveries = (0..delivery_count)
                    .map(|j| self.delivery(j + 1, base + j as u32))
                    .collect();

                Route {
                    id: i as u32 + 1,
                    route: self.pick(&ROUTE_NAMES).to_string(),
                    warehouse: self.pick(&WAREHOUSES).to_string(),
                    shift: self.pick(&Shift::ALL),
                    deliveries,
                }
            })
            .collect()
    }

    fn deliveries(&mut self, count: usize) -> Vec<Delivery> {
        debug!(count, "Generating deliveries");
        let mut deliveries: Vec<Delivery> = (0..count)
            .map(|i| self.delivery(i + 1, FIRST_DELIVERY_CODE + i as u32))
            .collect();
        deliveries.sort_by_key(|d| d.code);
        renumber(&mut deliveries);
        deliveries
    }
}
