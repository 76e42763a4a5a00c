//! Parking utilization measurement.
//!
//! - `capacity`: usable capacity and occupancy of a single curb lane, either
//!   from fixed slots or by scanning free curb between obstacles.
//! - `blockage`: the sub-range of a curb lane made unusable by queued traffic
//!   on the adjoining travel lane.
//! - `ownership`: bounded walk up ownership edges to a lane's building.
//! - `aggregate`: per-district and per-building utilization over a snapshot.

pub mod aggregate;
pub mod blockage;
pub mod capacity;
pub mod ownership;

#[cfg(test)]
mod tests_aggregate;

pub use aggregate::*;
pub use blockage::*;
pub use capacity::*;
pub use ownership::*;
