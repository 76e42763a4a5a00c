//! Pure price functions.

use super::constants::{
    ABSOLUTE_MAX_PRICE, HIGH_UTILIZATION_THRESHOLD, LOW_UTILIZATION_THRESHOLD,
    TARGET_UTILIZATION,
};

/// Price for a given utilization, interpolated piecewise-linearly between
/// `min_price` (at 0.2), `base_price` (at 0.5) and `max_price` (at 0.8).
///
/// Rounds half away from zero. A non-finite utilization is treated as 0.
pub fn adjusted_price(base_price: i32, max_price: i32, min_price: i32, utilization: f64) -> i32 {
    let utilization = if utilization.is_finite() {
        utilization
    } else {
        0.0
    };

    if utilization < LOW_UTILIZATION_THRESHOLD {
        return min_price;
    }
    if utilization > HIGH_UTILIZATION_THRESHOLD {
        return max_price;
    }

    let (from, to, factor) = if utilization <= TARGET_UTILIZATION {
        let factor = (utilization - LOW_UTILIZATION_THRESHOLD)
            / (TARGET_UTILIZATION - LOW_UTILIZATION_THRESHOLD);
        (min_price, base_price, factor)
    } else {
        let factor = (utilization - TARGET_UTILIZATION)
            / (HIGH_UTILIZATION_THRESHOLD - TARGET_UTILIZATION);
        (base_price, max_price, factor)
    };
    (f64::from(from) + factor * f64::from(to - from)).round() as i32
}

/// Price ceiling: `base + ceil(base * max_increase)`, capped at
/// `ABSOLUTE_MAX_PRICE`. A zero base uses `round(max_increase * 10)` instead.
pub fn max_price(base_price: i32, max_increase: f64) -> i32 {
    let raw = if base_price == 0 {
        (max_increase * 10.0).round() as i32
    } else {
        base_price + (f64::from(base_price) * max_increase).ceil() as i32
    };
    raw.min(ABSOLUTE_MAX_PRICE)
}

/// Price floor: `floor(base * (1 - max_decrease))`, never below 0.
pub fn min_price(base_price: i32, max_decrease: f64) -> i32 {
    if base_price == 0 {
        return 0;
    }
    ((f64::from(base_price) * (1.0 - max_decrease)).floor() as i32).max(0)
}

/// The price range of one pricing category for a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBand {
    pub base: i32,
    pub min: i32,
    pub max: i32,
}

impl PriceBand {
    /// Band from a standard price and percentage limits (200 = +200%).
    pub fn new(base_price: i32, max_increase_pct: u32, max_discount_pct: u32) -> Self {
        Self {
            base: base_price,
            min: min_price(base_price, f64::from(max_discount_pct) / 100.0),
            max: max_price(base_price, f64::from(max_increase_pct) / 100.0),
        }
    }

    /// Price for `utilization`, bounded to `[0, ABSOLUTE_MAX_PRICE]`.
    pub fn price_for(&self, utilization: f64) -> i32 {
        adjusted_price(self.base, self.max, self.min, utilization).clamp(0, ABSOLUTE_MAX_PRICE)
    }
}
