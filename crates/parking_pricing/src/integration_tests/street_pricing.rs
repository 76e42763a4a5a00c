//! Street parking priced per district.

use crate::network::{CarLane, ParkingLaneFlags};
use crate::pricing::CategorySettings;
use crate::test_harness::{CurbLaneSpec, TestCity};

fn street_city() -> TestCity {
    TestCity::new()
        .with_parking_fee_policies()
        .with_street_pricing_enabled()
}

#[test]
fn test_empty_district_curb_gets_minimum_price() {
    let mut city = street_city();
    let district = city.spawn_district();
    let road = city.spawn_road(Some(district), Some(district));
    city.spawn_curb_lane(road, CurbLaneSpec::continuous(15.0));

    assert!(city.run_pricing_cycle());

    // Street defaults: base 5, -50% -> 2
    assert_eq!(city.street_price(district), Some(2));
    let policy = city.policy(district, city.street_fee()).unwrap();
    assert!(policy.active);
    assert_eq!(city.stats().districts_priced, 1);
}

#[test]
fn test_full_district_curb_gets_maximum_price() {
    let mut city = street_city();
    let district = city.spawn_district();
    let road = city.spawn_road(Some(district), Some(district));
    let lane = city.spawn_curb_lane(road, CurbLaneSpec::continuous(15.0));
    for position in [0.15, 0.5, 0.85] {
        city.park_car(lane, position, 4.0);
    }

    assert!(city.run_pricing_cycle());

    // Street defaults: base 5, +200% -> 15
    assert_eq!(city.street_price(district), Some(15));
}

#[test]
fn test_price_follows_demand_between_cycles() {
    let mut city = street_city();
    let district = city.spawn_district();
    let road = city.spawn_road(Some(district), Some(district));
    let lane = city.spawn_curb_lane(road, CurbLaneSpec::continuous(15.0));

    assert!(city.run_pricing_cycle());
    let quiet = city.street_price(district).unwrap();

    let cars: Vec<_> = [0.15, 0.5, 0.85]
        .into_iter()
        .map(|p| city.park_car(lane, p, 4.0))
        .collect();
    assert!(city.run_pricing_cycle());
    let busy = city.street_price(district).unwrap();
    assert!(busy > quiet, "busy {busy} should exceed quiet {quiet}");

    for car in cars {
        city.unpark_car(lane, car);
    }
    assert!(city.run_pricing_cycle());
    assert_eq!(city.street_price(district), Some(quiet));
}

#[test]
fn test_border_road_counts_for_both_districts() {
    let mut city = street_city();
    let west = city.spawn_district();
    let east = city.spawn_district();
    let border = city.spawn_road(Some(west), Some(east));
    let lane = city.spawn_curb_lane(border, CurbLaneSpec::continuous(15.0));
    for position in [0.15, 0.5, 0.85] {
        city.park_car(lane, position, 4.0);
    }

    assert!(city.run_pricing_cycle());

    assert_eq!(city.street_price(west), Some(15));
    assert_eq!(city.street_price(east), Some(15));
}

#[test]
fn test_district_without_parking_is_priced_at_minimum() {
    let mut city = street_city();
    let district = city.spawn_district();

    assert!(city.run_pricing_cycle());

    assert_eq!(city.street_price(district), Some(2));
}

#[test]
fn test_virtual_lanes_are_ignored() {
    let mut city = street_city();
    let district = city.spawn_district();
    let road = city.spawn_road(Some(district), Some(district));
    city.spawn_curb_lane(road, CurbLaneSpec::continuous(15.0));
    let ghost = city.spawn_curb_lane(
        road,
        CurbLaneSpec::continuous(15.0).with_flags(ParkingLaneFlags {
            virtual_lane: true,
            ..Default::default()
        }),
    );
    for position in [0.15, 0.5, 0.85] {
        city.park_car(ghost, position, 4.0);
    }

    assert!(city.run_pricing_cycle());

    assert_eq!(city.street_price(district), Some(2));
}

#[test]
fn test_queued_traffic_reduces_curb_capacity() {
    let mut city = street_city().with_street_settings(CategorySettings {
        enabled: true,
        standard_price: 10,
        ..CategorySettings::street_defaults()
    });
    let district = city.spawn_district();
    let road = city.spawn_road(Some(district), Some(district));
    let lane = city.spawn_curb_lane(road, CurbLaneSpec::continuous(50.0));
    city.park_car(lane, 0.04, 3.0);
    city.reserve_spot(lane, 0.5);

    // 9 free spaces behind the car + 2 occupants: 2/11 -> minimum price
    assert!(city.run_pricing_cycle());
    assert_eq!(city.street_price(district), Some(5));

    // Traffic queued over the far half leaves 4 free spaces: 2/6 -> 7
    city.spawn_travel_lane_beside(lane, CarLane::blocked(140, 200));
    assert!(city.run_pricing_cycle());
    assert_eq!(city.street_price(district), Some(7));
}

#[test]
fn test_street_pricing_disabled_leaves_districts_untouched() {
    let mut city = TestCity::new().with_parking_fee_policies();
    let district = city.spawn_district();
    let road = city.spawn_road(Some(district), Some(district));
    city.spawn_curb_lane(road, CurbLaneSpec::continuous(15.0));

    city.run_pricing_cycle();

    assert_eq!(city.street_price(district), None);
    assert_eq!(city.stats().districts_priced, 0);
}
