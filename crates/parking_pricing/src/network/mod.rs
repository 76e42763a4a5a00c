//! Host road-network model read by the parking pricing pipeline.
//!
//! Roads and buildings own sub-lanes. Curb parking lanes carry a curve, flags,
//! a prefab reference to their slot configuration, the objects currently on
//! them and the ranges where other lanes cross them. Travel lanes report a
//! queue blockage range. Garage lanes are plain counters.
//!
//! Nothing in this module mutates during a pricing cycle; the pipeline copies
//! what it needs into an immutable snapshot.

pub mod lanes;
pub mod ownership;
pub mod slots;
pub mod vehicles;


pub use lanes::*;
pub use ownership::*;
pub use slots::*;
pub use vehicles::*;
