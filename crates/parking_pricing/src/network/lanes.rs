//! Lane components: geometry, curb parking configuration, occupants,
//! overlaps, travel-lane blockage and garage counters.

use bevy::prelude::*;

use crate::curve::{Bezier, CurveRange};

/// Identity of a path node, compared ignoring the curve position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeId(pub u32);

/// Start, middle and end node identities of a lane.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LaneNodes {
    pub start: NodeId,
    pub middle: NodeId,
    pub end: NodeId,
}

/// Geometry of a lane.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Curve(pub Bezier);

/// Flags of a curb parking lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParkingLaneFlags {
    /// Pathfinding-only lane with no physical parking.
    pub virtual_lane: bool,
    /// The lane's start coincides with the start of the physical road lane.
    pub starting_lane: bool,
    /// The lane's end coincides with the end of the physical road lane.
    pub ending_lane: bool,
}

/// A curb lane where vehicles park along a street or inside a lot.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParkingLane {
    pub flags: ParkingLaneFlags,
}

/// Points a lane at the prefab entity holding its static configuration.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefabRef(pub Entity);

/// Slot configuration stored on a parking-lane prefab.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct ParkingLaneData {
    /// Distance between fixed slots. Zero means continuous curb parking.
    pub slot_interval: f32,
    /// Longest vehicle the lane accepts. Zero means unset.
    pub max_car_length: f32,
}

impl ParkingLaneData {
    pub fn continuous(max_car_length: f32) -> Self {
        Self {
            slot_interval: 0.0,
            max_car_length,
        }
    }

    pub fn slotted(slot_interval: f32) -> Self {
        Self {
            slot_interval,
            max_car_length: 0.0,
        }
    }

    pub fn has_slots(&self) -> bool {
        self.slot_interval != 0.0
    }
}

/// An object occupying a lane at a parametric position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneObject {
    pub object: Entity,
    /// `x` is the object's position along the curve. Values of 2.0 or more
    /// mean the object has no position on this lane.
    pub curve_position: Vec2,
}

/// Objects currently on a lane, in curve order.
#[derive(Component, Debug, Clone, Default)]
pub struct LaneObjects(pub Vec<LaneObject>);

/// A range of this lane crossed by another lane, byte-quantized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneOverlap {
    pub this_start: u8,
    pub this_end: u8,
}

impl LaneOverlap {
    pub fn range(&self) -> CurveRange {
        CurveRange::from_quantized(self.this_start, self.this_end)
    }
}

/// Overlaps on a lane, sorted by start.
#[derive(Component, Debug, Clone, Default)]
pub struct LaneOverlaps(pub Vec<LaneOverlap>);

/// A travel lane. A blockage is present when `blockage_end >= blockage_start`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarLane {
    pub blockage_start: u8,
    pub blockage_end: u8,
}

impl Default for CarLane {
    fn default() -> Self {
        Self::UNBLOCKED
    }
}

impl CarLane {
    pub const UNBLOCKED: Self = Self {
        blockage_start: 255,
        blockage_end: 0,
    };

    pub fn blocked(start: u8, end: u8) -> Self {
        Self {
            blockage_start: start,
            blockage_end: end,
        }
    }

    pub fn blockage(&self) -> Option<CurveRange> {
        (self.blockage_end >= self.blockage_start)
            .then(|| CurveRange::from_quantized(self.blockage_start, self.blockage_end))
    }
}

/// Fixed-capacity parking with no spatial layout (garages, lots).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GarageLane {
    pub vehicle_capacity: u16,
    pub vehicle_count: u16,
}
