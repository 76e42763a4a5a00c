//! Deterministic ordering of the pricing systems via `SystemSet` phases.
//!
//! # FixedUpdate phases (`SimulationSet`)
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** – Tick counter. Sets up per-tick state that the pricing
//!   systems read.
//! * **Simulation** – Policy prefab resolution, cycle start, result
//!   collection and price application, chained in that order so a cycle whose
//!   tasks finish within the tick is applied in the same tick.
//! * **PostSim** – Reporting only. Host plugins place systems that read
//!   `ParkingPricingStats` or the updated policies here.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
///
/// Configured as a chain: `PreSim` → `Simulation` → `PostSim`.
/// Host plugins use `.in_set(SimulationSet::X)` to order their own systems
/// relative to the pricing pipeline.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Pre-simulation setup: tick counter.
    PreSim,
    /// Pricing pipeline: prefab resolution, cycle start, collect, apply.
    Simulation,
    /// Post-simulation reporting.
    PostSim,
}
