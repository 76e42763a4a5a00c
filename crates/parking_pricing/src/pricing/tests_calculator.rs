//! Tests for the price curve and its bounds.

use super::*;

fn scenario_band() -> PriceBand {
    // base 10, +200% -> 30, -50% -> 5
    PriceBand::new(10, 200, 50)
}

// -------------------------------------------------------------------------
// Bounds
// -------------------------------------------------------------------------

#[test]
fn test_scenario_band_bounds() {
    let band = scenario_band();
    assert_eq!(band.base, 10);
    assert_eq!(band.max, 30);
    assert_eq!(band.min, 5);
}

#[test]
fn test_max_price_capped() {
    assert_eq!(max_price(40, 2.0), ABSOLUTE_MAX_PRICE);
}

#[test]
fn test_max_price_rounds_increase_up() {
    // 7 * 0.5 = 3.5 -> 4
    assert_eq!(max_price(7, 0.5), 11);
}

#[test]
fn test_max_price_free_base_ramps_up() {
    assert_eq!(max_price(0, 2.0), 20);
    assert_eq!(max_price(0, 3.0), 30);
    assert_eq!(max_price(0, 0.0), 0);
}

#[test]
fn test_min_price_floors() {
    // 5 * 0.5 = 2.5 -> 2
    assert_eq!(min_price(5, 0.5), 2);
    assert_eq!(min_price(10, 1.0), 0);
    assert_eq!(min_price(0, 0.5), 0);
}

#[test]
fn test_min_price_never_negative() {
    assert_eq!(min_price(10, 1.5), 0);
}

// -------------------------------------------------------------------------
// Curve
// -------------------------------------------------------------------------

#[test]
fn test_target_utilization_gives_base() {
    assert_eq!(adjusted_price(10, 30, 5, 0.5), 10);
}

#[test]
fn test_low_utilization_gives_min() {
    assert_eq!(adjusted_price(10, 30, 5, 0.1), 5);
}

#[test]
fn test_high_utilization_gives_max() {
    assert_eq!(adjusted_price(10, 30, 5, 0.9), 30);
}

#[test]
fn test_upper_interpolation() {
    // factor (0.65 - 0.5) / 0.3 = 0.5 -> 10 + 0.5 * 20
    assert_eq!(adjusted_price(10, 30, 5, 0.65), 20);
}

#[test]
fn test_interpolation_rounds_half_away_from_zero() {
    // factor (0.65 - 0.5) / 0.3 = 0.5 -> 10 + 0.5 * 5 = 12.5 -> 13
    assert_eq!(adjusted_price(10, 15, 5, 0.65), 13);
}

#[test]
fn test_lower_interpolation_between_min_and_base() {
    let price = adjusted_price(10, 30, 5, 0.35);
    assert!((5..=10).contains(&price), "got {price}");
}

#[test]
fn test_threshold_edges() {
    assert_eq!(adjusted_price(10, 30, 5, 0.2), 5);
    assert_eq!(adjusted_price(10, 30, 5, 0.8), 30);
}

#[test]
fn test_nan_utilization_gives_min() {
    assert_eq!(adjusted_price(10, 30, 5, f64::NAN), 5);
}

#[test]
fn test_price_within_band_and_monotonic() {
    for band in [
        scenario_band(),
        PriceBand::new(0, 200, 50),
        PriceBand::new(50, 300, 100),
        PriceBand::new(3, 0, 0),
        PriceBand::new(25, 17, 33),
    ] {
        let mut previous = i32::MIN;
        for step in 0..=1000 {
            let u = f64::from(step) / 1000.0;
            let price = band.price_for(u);
            assert!(
                price >= band.min && price <= band.max,
                "{band:?} at {u}: {price} outside [{}, {}]",
                band.min,
                band.max
            );
            assert!(price >= previous, "{band:?} not monotonic at {u}");
            previous = price;
        }
    }
}

#[test]
fn test_price_is_pure() {
    let band = scenario_band();
    for u in [0.0, 0.21, 0.5, 0.66, 1.0] {
        assert_eq!(band.price_for(u), band.price_for(u));
    }
}

#[test]
fn test_price_for_clamps_to_absolute_range() {
    let band = PriceBand {
        base: 80,
        min: 60,
        max: 90,
    };
    assert_eq!(band.price_for(0.5), ABSOLUTE_MAX_PRICE);
}
