//! Price curve thresholds and schedule constants.

/// Below this utilization the price drops to its floor.
pub const LOW_UTILIZATION_THRESHOLD: f64 = 0.2;

/// Utilization at which the standard price applies.
pub const TARGET_UTILIZATION: f64 = 0.5;

/// Above this utilization the price rises to its ceiling.
pub const HIGH_UTILIZATION_THRESHOLD: f64 = 0.8;

/// Hard cap on any parking price.
pub const ABSOLUTE_MAX_PRICE: i32 = 50;

/// Simulation ticks in one in-game day.
pub const TICKS_PER_DAY: u64 = 262_144;

/// Pricing updates per day used when no settings resource is available.
pub const FALLBACK_UPDATES_PER_DAY: u64 = 45;

/// Slider bounds of the per-category settings.
pub const MAX_STANDARD_PRICE: u32 = 50;
pub const MAX_PRICE_INCREASE_PCT: u32 = 300;
pub const MAX_PRICE_DISCOUNT_PCT: u32 = 100;
