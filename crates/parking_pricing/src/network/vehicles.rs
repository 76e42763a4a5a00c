//! Vehicle-side markers that affect parking accounting.

use bevy::prelude::*;

/// Marker for a vehicle that is parked (as opposed to driving through).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ParkedCar;

/// Marker for an object that is being created or destroyed and has no
/// physical footprint yet.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Unspawned;

/// Distance from a parked vehicle's reference position to the ends of its
/// footprint, measured toward the lane start and toward the lane end.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct ParkingOffsets {
    pub start: f32,
    pub end: f32,
}

impl ParkingOffsets {
    /// Offsets for a vehicle of `length` parked at its midpoint.
    pub fn centered(length: f32) -> Self {
        Self {
            start: length * 0.5,
            end: length * 0.5,
        }
    }
}
