//! Occupancy-driven parking prices.
//!
//! Maps a measured utilization fraction onto a price between a floor and a
//! ceiling derived from the configured standard price:
//!
//! ```text
//! utilization  0.0 ── 0.2 ───── 0.5 ───── 0.8 ── 1.0
//! price        min    min ──╱── base ──╱── max   max
//! ```
//!
//! The ceiling is capped at `ABSOLUTE_MAX_PRICE`. A free (zero) standard price
//! can still ramp up under high demand unless the allowed increase is also 0.

pub mod calculator;
pub mod constants;
pub mod settings;

#[cfg(test)]
mod tests_calculator;

pub use calculator::*;
pub use constants::*;
pub use settings::*;
