//! The pricing pipeline: snapshot, parallel utilization, deferred apply.
//!
//! - `snapshot`: immutable copy of the lanes, owners and policies a cycle reads.
//! - `plan`: which categories a cycle prices and at what band.
//! - `queue`: price commands produced by workers and applied on the main thread.
//! - `controller`: the systems driving a cycle through its phases.

pub mod controller;
pub mod error;
pub mod plan;
pub mod queue;
pub mod snapshot;
pub mod types;


pub use controller::*;
pub use error::*;
pub use plan::*;
pub use queue::*;
pub use snapshot::*;
pub use types::*;
