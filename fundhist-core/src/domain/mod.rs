//! Domain types: funds, price points, snapshots.

pub mod fund;
pub mod point;
pub mod snapshot;

pub use fund::{default_lineup, FundDescriptor};
pub use point::{PricePoint, Series};
pub use snapshot::Snapshot;
