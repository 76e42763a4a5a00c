//! Tests for district and building aggregation over a snapshot.

use bevy::prelude::*;

use crate::curve::{Bezier, CurveRange};
use crate::network::{
    BorderDistrict, LaneNodes, NodeId, ParkingLaneData, ParkingLaneFlags, ParkingOffsets,
};
use crate::pipeline::{
    CurbLaneRecord, GarageLaneRecord, PricingCategory, PricingSnapshot, TravelLaneRecord,
};

use super::*;

fn id(n: u32) -> Entity {
    Entity::from_raw(n)
}

fn curb_lane(lane: Entity, owner: Option<Entity>, length: f32) -> CurbLaneRecord {
    CurbLaneRecord {
        lane,
        owner,
        curve: Bezier::line(Vec3::ZERO, Vec3::new(length, 0.0, 0.0)),
        flags: ParkingLaneFlags::default(),
        data: ParkingLaneData::continuous(0.0),
        start_node: NodeId(lane.index()),
        occupants: Vec::new(),
        overlaps: Vec::new(),
    }
}

fn road(snapshot: &mut PricingSnapshot, road: Entity, left: Option<Entity>, right: Option<Entity>) {
    snapshot
        .border_districts
        .insert(road, BorderDistrict { left, right });
}

// -------------------------------------------------------------------------
// Districts
// -------------------------------------------------------------------------

#[test]
fn test_side_weight() {
    let d = id(1);
    let other = id(2);
    assert_eq!(district_side_weight(&BorderDistrict::both(d), d), 1.0);
    let left_only = BorderDistrict {
        left: Some(d),
        right: Some(other),
    };
    assert_eq!(district_side_weight(&left_only, d), 0.5);
    assert_eq!(district_side_weight(&left_only, other), 0.5);
    assert_eq!(district_side_weight(&left_only, id(3)), 0.0);
}

#[test]
fn test_district_weights_border_roads_by_half() {
    let d = id(1);
    let mut snapshot = PricingSnapshot::default();
    road(&mut snapshot, id(10), Some(d), Some(d));
    road(&mut snapshot, id(11), Some(d), None);

    // Full road: 30 lane with one car -> capacity 5, occupied 1
    let mut full = curb_lane(id(20), Some(id(10)), 30.0);
    full.occupants
        .push(Occupant::parked_at(0.5, ParkingOffsets::centered(4.0)));
    // Half road: empty 15 lane -> capacity 3 at weight 0.5
    let half = curb_lane(id(21), Some(id(11)), 15.0);
    snapshot.curb_lanes = vec![full, half];

    let result = district_utilization(&snapshot, d);
    assert_eq!(result.target, d);
    assert_eq!(result.category, PricingCategory::Street);
    assert_eq!(result.totals.capacity, 6.5);
    assert_eq!(result.totals.occupied, 1.0);
    assert!((result.utilization - 1.0 / 6.5).abs() < 1e-12);
}

#[test]
fn test_district_skips_virtual_unowned_and_foreign_lanes() {
    let d = id(1);
    let mut snapshot = PricingSnapshot::default();
    road(&mut snapshot, id(10), Some(d), Some(d));
    road(&mut snapshot, id(11), Some(id(2)), Some(id(2)));

    let mut virtual_lane = curb_lane(id(20), Some(id(10)), 30.0);
    virtual_lane.flags.virtual_lane = true;
    snapshot.curb_lanes = vec![
        virtual_lane,
        curb_lane(id(21), None, 30.0),
        curb_lane(id(22), Some(id(11)), 30.0),
    ];

    let result = district_utilization(&snapshot, d);
    assert_eq!(result.totals, UtilizationTotals::default());
    assert_eq!(result.utilization, 0.0);
}

#[test]
fn test_district_lane_blocked_by_sibling_travel_lane() {
    let d = id(1);
    let mut snapshot = PricingSnapshot::default();
    road(&mut snapshot, id(10), Some(d), Some(d));
    let curb = curb_lane(id(20), Some(id(10)), 103.0);
    let curb_start = curb.start_node;
    snapshot.curb_lanes = vec![curb];
    snapshot.sub_lanes.insert(id(10), vec![id(20), id(30)]);
    snapshot.travel_lanes.insert(
        id(30),
        TravelLaneRecord {
            nodes: LaneNodes {
                start: NodeId(900),
                middle: curb_start,
                end: NodeId(901),
            },
            // Widened to [0.59, 1.0]
            blockage: Some(CurveRange::new(0.6, 0.7)),
        },
    );

    let blocked = snapshot.blocked_range(&snapshot.curb_lanes[0]);
    assert!((blocked.min - 0.59).abs() < 1e-6);
    assert_eq!(blocked.max, 1.0);

    // Center ~81.9, halves ~21.1: ~60.8 of curb before the zone -> 12 spaces
    let result = district_utilization(&snapshot, d);
    assert_eq!(result.totals.capacity, 12.0);
}

// -------------------------------------------------------------------------
// Buildings
// -------------------------------------------------------------------------

#[test]
fn test_building_sums_curb_and_garage_lanes() {
    let building = id(1);
    let lot = id(2);
    let mut snapshot = PricingSnapshot::default();
    snapshot.building_entities.insert(building);
    snapshot.owners.insert(lot, building);
    snapshot.owners.insert(id(20), lot);
    snapshot.owners.insert(id(30), building);
    snapshot.curb_lanes = vec![curb_lane(id(20), Some(lot), 15.0)];
    snapshot.garage_lanes = vec![GarageLaneRecord {
        lane: id(30),
        capacity: 20,
        count: 15,
    }];

    let result = building_utilization(&snapshot, building);
    assert_eq!(result.category, PricingCategory::Lot);
    assert_eq!(result.totals.capacity, 23.0);
    assert_eq!(result.totals.occupied, 15.0);
    assert!((result.utilization - 15.0 / 23.0).abs() < 1e-12);
}

#[test]
fn test_building_ignores_other_buildings_lanes() {
    let building = id(1);
    let neighbor = id(2);
    let mut snapshot = PricingSnapshot::default();
    snapshot.building_entities.extend([building, neighbor]);
    snapshot.owners.insert(id(30), neighbor);
    snapshot.garage_lanes = vec![GarageLaneRecord {
        lane: id(30),
        capacity: 10,
        count: 10,
    }];

    let result = building_utilization(&snapshot, building);
    assert_eq!(result.utilization, 0.0);
    assert_eq!(building_utilization(&snapshot, neighbor).utilization, 1.0);
}

#[test]
fn test_zero_capacity_is_zero_utilization() {
    let totals = UtilizationTotals::default();
    assert_eq!(totals.utilization(), 0.0);
}

#[test]
fn test_over_capacity_garage_exceeds_one() {
    let mut totals = UtilizationTotals::default();
    totals.add(
        LaneCapacity {
            capacity: 4,
            occupied: 6,
        },
        1.0,
    );
    assert_eq!(totals.utilization(), 1.5);
}
