//! Roads, buildings, districts and the ownership edges between them.

use bevy::prelude::*;

/// Marker for a district area.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct District;

/// Marker for a building.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Building;

/// Marker for a road edge.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Road;

/// Districts bordering a road on its left and right sides.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderDistrict {
    pub left: Option<Entity>,
    pub right: Option<Entity>,
}

impl BorderDistrict {
    pub fn both(district: Entity) -> Self {
        Self {
            left: Some(district),
            right: Some(district),
        }
    }
}

/// Ownership edge: this entity belongs to the contained one.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner(pub Entity);

/// Lanes owned by a road or building.
#[derive(Component, Debug, Clone, Default)]
pub struct SubLanes(pub Vec<Entity>);
