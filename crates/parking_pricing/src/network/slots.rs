//! Slot counting for lanes with fixed parking slots.

use crate::curve::Bezier;

use super::lanes::{ParkingLaneData, ParkingLaneFlags};

/// Clearance kept at a lane end that is also a road-lane boundary.
///
/// Applied at the start when `starting_lane` is set and at the end when
/// `ending_lane` is set, so both flags name the ends that need clearance.
pub const ROAD_BOUNDARY_CLEARANCE: f32 = 0.5;

/// Clearance at the start of a curb lane.
pub fn start_clearance(flags: ParkingLaneFlags) -> f32 {
    if flags.starting_lane {
        ROAD_BOUNDARY_CLEARANCE
    } else {
        0.0
    }
}

/// Clearance at the end of a curb lane.
pub fn end_clearance(flags: ParkingLaneFlags) -> f32 {
    if flags.ending_lane {
        ROAD_BOUNDARY_CLEARANCE
    } else {
        0.0
    }
}

/// Number of fixed slots that fit on a slotted curb lane.
///
/// Returns 0 for continuous lanes, non-positive intervals and degenerate
/// curves.
pub fn parking_slot_count(curve: &Bezier, flags: ParkingLaneFlags, data: &ParkingLaneData) -> u32 {
    if !data.has_slots() || data.slot_interval < 0.0 || !curve.is_finite() {
        return 0;
    }
    let usable = curve.length() - start_clearance(flags) - end_clearance(flags);
    if usable <= 0.0 {
        return 0;
    }
    (usable / data.slot_interval).floor() as u32
}
