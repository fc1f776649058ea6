//! Route and delivery records, and the sources that produce them.

mod mock;
mod model;

pub use mock::{DataSource, MockDataSource, FIRST_DELIVERY_CODE};
pub use model::{renumber, Delivery, Frequency, Route, Shift};
