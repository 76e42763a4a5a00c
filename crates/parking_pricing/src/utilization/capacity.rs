//! Capacity geometry for a single curb lane.
//!
//! Slotted lanes count fixed slots. Continuous lanes are scanned from the
//! curve start to its end: parked vehicles and overlap ranges are obstacles,
//! and every free run of curb between two obstacles holds
//! `floor(length / car_length)` more vehicles. Lengths are straight-line
//! distances between points on the curve, minus the clearance each obstacle
//! keeps on either side.

use bevy::prelude::*;

use crate::curve::{Bezier, CurveRange};
use crate::network::{
    end_clearance, parking_slot_count, start_clearance, ParkingLaneData, ParkingLaneFlags,
    ParkingOffsets,
};

/// Vehicle length assumed when a lane does not configure one.
pub const STANDARD_CAR_LENGTH: f32 = 5.0;

/// Extra clearance on both sides of a parked vehicle's footprint.
pub const PARKED_CAR_CLEARANCE: f32 = 1.0;

/// Clearance on both sides of an overlap range.
pub const OVERLAP_CLEARANCE: f32 = 0.5;

/// Parametric position meaning "no further obstacle". Greater than any valid
/// position on a curve.
pub const NO_OBSTACLE: f32 = 2.0;

/// An object on a curb lane, as seen by the capacity scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occupant {
    /// Parametric position along the lane.
    pub position: f32,
    pub parked: bool,
    pub unspawned: bool,
    pub offsets: ParkingOffsets,
}

impl Occupant {
    pub fn parked_at(position: f32, offsets: ParkingOffsets) -> Self {
        Self {
            position,
            parked: true,
            unspawned: false,
            offsets,
        }
    }

    /// Whether this occupant takes up physical curb during the scan.
    fn is_obstacle(&self) -> bool {
        self.parked && !self.unspawned && self.position < NO_OBSTACLE
    }
}

/// Everything the capacity calculation needs to know about one curb lane.
#[derive(Debug, Clone, Copy)]
pub struct CurbLaneView<'a> {
    pub curve: &'a Bezier,
    pub flags: ParkingLaneFlags,
    pub data: &'a ParkingLaneData,
    pub occupants: &'a [Occupant],
    /// Normalized overlap ranges, sorted by start.
    pub overlaps: &'a [CurveRange],
    /// Range blocked by queued traffic; empty when there is none.
    pub blocked: CurveRange,
}

/// Capacity and occupancy of a parking resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LaneCapacity {
    pub capacity: u32,
    pub occupied: u32,
}

/// Capacity and occupancy of a curb lane.
///
/// Virtual lanes are excluded by callers, not here.
pub fn lane_capacity(lane: &CurbLaneView) -> LaneCapacity {
    if lane.data.has_slots() {
        slotted_capacity(lane)
    } else {
        continuous_capacity(lane)
    }
}

/// Slotted lanes: the host's slot count, with every parked vehicle occupying
/// a slot whether or not it is spawned.
fn slotted_capacity(lane: &CurbLaneView) -> LaneCapacity {
    LaneCapacity {
        capacity: parking_slot_count(lane.curve, lane.flags, lane.data),
        occupied: lane.occupants.iter().filter(|o| o.parked).count() as u32,
    }
}

/// Continuous lanes: free spaces between obstacles plus one committed space
/// per object already on the lane. Every listed object counts as occupied,
/// including unspawned ones that hold a reservation.
///
/// A non-finite curve has no free curb; only its occupants are counted.
fn continuous_capacity(lane: &CurbLaneView) -> LaneCapacity {
    let present = u32::try_from(lane.occupants.len()).unwrap_or(u32::MAX);
    if !lane.curve.is_finite() {
        return LaneCapacity {
            capacity: present,
            occupied: present,
        };
    }

    let car_length = if lane.data.max_car_length != 0.0 {
        lane.data.max_car_length
    } else {
        STANDARD_CAR_LENGTH
    };
    let blocked = BlockedZone::new(lane.curve, lane.blocked);

    let mut free_spaces = 0u32;
    let mut cursor = lane.curve.a;
    let mut cursor_clearance = start_clearance(lane.flags);

    for obstacle in ObstacleScan::new(lane.occupants, lane.overlaps) {
        let segment_end = lane.curve.position(obstacle.range.min);
        free_spaces = free_spaces.saturating_add(free_segment_spaces(
            cursor,
            segment_end,
            cursor_clearance,
            obstacle.lead_clearance,
            blocked.as_ref(),
            car_length,
        ));
        cursor_clearance = obstacle.trail_clearance;
        cursor = lane.curve.position(obstacle.range.max);
    }

    free_spaces = free_spaces.saturating_add(free_segment_spaces(
        cursor,
        lane.curve.d,
        cursor_clearance,
        end_clearance(lane.flags),
        blocked.as_ref(),
        car_length,
    ));

    LaneCapacity {
        capacity: free_spaces.saturating_add(present),
        occupied: present,
    }
}

/// Whole vehicles of `car_length` that fit into `length`. Non-positive (or
/// NaN) lengths hold none.
pub fn spaces_in(length: f32, car_length: f32) -> u32 {
    if length > 0.0 && car_length > 0.0 {
        (length / car_length).floor() as u32
    } else {
        0
    }
}

fn free_segment_spaces(
    from: Vec3,
    to: Vec3,
    from_clearance: f32,
    to_clearance: f32,
    blocked: Option<&BlockedZone>,
    car_length: f32,
) -> u32 {
    let mut length = from.distance(to) - from_clearance - to_clearance;
    if let Some(zone) = blocked {
        length = zone.clip(length, from, to, from_clearance, to_clearance);
    }
    spaces_in(length, car_length)
}

/// A blocked range resolved to world positions on the curve.
#[derive(Debug, Clone, Copy)]
struct BlockedZone {
    center: Vec3,
    /// Distance from the range start to its center.
    start_half: f32,
    /// Distance from the range end to its center.
    end_half: f32,
}

impl BlockedZone {
    fn new(curve: &Bezier, range: CurveRange) -> Option<Self> {
        if range.is_empty() {
            return None;
        }
        let center = curve.position(range.center());
        Some(Self {
            center,
            start_half: curve.position(range.min).distance(center),
            end_half: curve.position(range.max).distance(center),
        })
    }

    /// Keep only the longer side of a free segment split by the blocked zone.
    fn clip(&self, length: f32, from: Vec3, to: Vec3, from_clearance: f32, to_clearance: f32) -> f32 {
        let before = from.distance(self.center) - from_clearance - self.start_half;
        let after = to.distance(self.center) - to_clearance - self.end_half;
        length.min(before.max(after))
    }
}

/// One obstacle along the curve with its clearances.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Obstacle {
    range: CurveRange,
    /// Clearance kept before the obstacle.
    lead_clearance: f32,
    /// Clearance kept after the obstacle.
    trail_clearance: f32,
}

/// Yields parked vehicles and merged overlaps in curve order.
///
/// Three cursors: the next parked vehicle, the next (merged) overlap, and the
/// read positions in both source lists. When a vehicle and an overlap start at
/// the same position the vehicle comes first.
struct ObstacleScan<'a> {
    occupants: &'a [Occupant],
    overlaps: &'a [CurveRange],
    occupant_idx: usize,
    overlap_idx: usize,
    next_car: Option<Obstacle>,
    next_overlap: Option<Obstacle>,
}

impl<'a> ObstacleScan<'a> {
    fn new(occupants: &'a [Occupant], overlaps: &'a [CurveRange]) -> Self {
        let mut scan = Self {
            occupants,
            overlaps,
            occupant_idx: 0,
            overlap_idx: 0,
            next_car: None,
            next_overlap: None,
        };
        scan.next_car = scan.advance_car();
        scan.next_overlap = scan.advance_overlap();
        scan
    }

    fn advance_car(&mut self) -> Option<Obstacle> {
        while let Some(occupant) = self.occupants.get(self.occupant_idx) {
            self.occupant_idx += 1;
            if occupant.is_obstacle() {
                return Some(Obstacle {
                    range: CurveRange::new(occupant.position, occupant.position),
                    lead_clearance: occupant.offsets.start + PARKED_CAR_CLEARANCE,
                    trail_clearance: occupant.offsets.end + PARKED_CAR_CLEARANCE,
                });
            }
        }
        None
    }

    fn advance_overlap(&mut self) -> Option<Obstacle> {
        next_merged_overlap(self.overlaps, &mut self.overlap_idx).map(|range| Obstacle {
            range,
            lead_clearance: OVERLAP_CLEARANCE,
            trail_clearance: OVERLAP_CLEARANCE,
        })
    }
}

impl Iterator for ObstacleScan<'_> {
    type Item = Obstacle;

    fn next(&mut self) -> Option<Obstacle> {
        let car_at = self.next_car.map_or(NO_OBSTACLE, |o| o.range.min);
        let overlap_at = self.next_overlap.map_or(NO_OBSTACLE, |o| o.range.min);

        if self.next_car.is_some() && car_at <= overlap_at {
            let car = self.next_car;
            self.next_car = self.advance_car();
            car
        } else if self.next_overlap.is_some() {
            let overlap = self.next_overlap;
            self.next_overlap = self.advance_overlap();
            overlap
        } else {
            None
        }
    }
}

/// Take the overlap at `*idx` and absorb every following overlap that starts
/// at or before the end of the range built so far.
pub fn next_merged_overlap(overlaps: &[CurveRange], idx: &mut usize) -> Option<CurveRange> {
    let mut merged = *overlaps.get(*idx)?;
    *idx += 1;
    while let Some(next) = overlaps.get(*idx) {
        if next.min > merged.max {
            break;
        }
        merged.max = merged.max.max(next.max);
        *idx += 1;
    }
    Some(merged)
}

/// All overlaps of a lane with touching or overlapping neighbors coalesced.
pub fn merge_overlaps(overlaps: &[CurveRange]) -> Vec<CurveRange> {
    let mut idx = 0;
    std::iter::from_fn(|| next_merged_overlap(overlaps, &mut idx)).collect()
}
