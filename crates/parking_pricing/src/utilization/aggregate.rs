//! Utilization of districts (street parking) and buildings (lot parking).
//!
//! Both aggregators are pure functions of an immutable snapshot and run on
//! worker threads, one task per district or building.

use bevy::prelude::*;

use crate::network::BorderDistrict;
use crate::pipeline::{CurbLaneRecord, GarageLaneRecord, PricingCategory, PricingSnapshot};

use super::capacity::{lane_capacity, LaneCapacity};
use super::ownership::lane_belongs_to_building;

/// Weighted capacity and occupancy totals.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UtilizationTotals {
    pub capacity: f64,
    pub occupied: f64,
}

impl UtilizationTotals {
    pub fn add(&mut self, lane: LaneCapacity, weight: f64) {
        self.capacity += f64::from(lane.capacity) * weight;
        self.occupied += f64::from(lane.occupied) * weight;
    }

    /// Occupied over capacity; zero when there is no capacity.
    pub fn utilization(&self) -> f64 {
        if self.capacity > 0.0 {
            self.occupied / self.capacity
        } else {
            0.0
        }
    }
}

/// Utilization measured for one district or building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtilizationResult {
    pub target: Entity,
    pub category: PricingCategory,
    pub utilization: f64,
    pub totals: UtilizationTotals,
}

impl UtilizationResult {
    fn new(target: Entity, category: PricingCategory, totals: UtilizationTotals) -> Self {
        Self {
            target,
            category,
            utilization: totals.utilization(),
            totals,
        }
    }
}

/// Share of a road's curb parking that belongs to `district`: the whole road
/// when both sides are in it, half when one side is, none otherwise.
pub fn district_side_weight(border: &BorderDistrict, district: Entity) -> f64 {
    match (border.left == Some(district), border.right == Some(district)) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.5,
        (false, false) => 0.0,
    }
}

/// Capacity of a curb lane including its blocked range.
pub fn curb_lane_capacity(snapshot: &PricingSnapshot, lane: &CurbLaneRecord) -> LaneCapacity {
    let blocked = snapshot.blocked_range(lane);
    lane_capacity(&lane.view(blocked))
}

fn garage_lane_capacity(lane: &GarageLaneRecord) -> LaneCapacity {
    LaneCapacity {
        capacity: lane.capacity,
        occupied: lane.count,
    }
}

/// Street parking utilization of `district` over every road curb lane.
pub fn district_utilization(snapshot: &PricingSnapshot, district: Entity) -> UtilizationResult {
    #[cfg(feature = "trace")]
    let _span = bevy::log::info_span!("district_utilization").entered();

    let mut totals = UtilizationTotals::default();
    let mut lanes = 0usize;
    for lane in snapshot.curb_lanes.iter().filter(|l| !l.flags.virtual_lane) {
        let Some(border) = lane.owner.and_then(|o| snapshot.border_districts.get(&o)) else {
            continue;
        };
        let weight = district_side_weight(border, district);
        if weight == 0.0 {
            continue;
        }
        totals.add(curb_lane_capacity(snapshot, lane), weight);
        lanes += 1;
    }

    debug!(
        "District {district}: {lanes} curb lanes, capacity {:.1}, occupied {:.1}",
        totals.capacity, totals.occupied
    );
    UtilizationResult::new(district, PricingCategory::Street, totals)
}

/// Lot parking utilization of `building` over its curb and garage lanes.
pub fn building_utilization(snapshot: &PricingSnapshot, building: Entity) -> UtilizationResult {
    #[cfg(feature = "trace")]
    let _span = bevy::log::info_span!("building_utilization").entered();

    let mut totals = UtilizationTotals::default();
    for lane in &snapshot.curb_lanes {
        if lane.flags.virtual_lane || !lane_belongs_to_building(snapshot, lane.lane, building) {
            continue;
        }
        totals.add(curb_lane_capacity(snapshot, lane), 1.0);
    }
    for garage in &snapshot.garage_lanes {
        if lane_belongs_to_building(snapshot, garage.lane, building) {
            totals.add(garage_lane_capacity(garage), 1.0);
        }
    }

    debug!(
        "Building {building}: capacity {:.1}, occupied {:.1}",
        totals.capacity, totals.occupied
    );
    UtilizationResult::new(building, PricingCategory::Lot, totals)
}
