//! Bounded walk from a lane up its ownership chain to a building.

use bevy::prelude::*;

/// Maximum number of ownership edges followed before giving up.
pub const MAX_OWNERSHIP_DEPTH: usize = 10;

/// Read access to ownership edges.
pub trait OwnershipGraph {
    /// Direct owner of `entity`, if it has one.
    fn owner_of(&self, entity: Entity) -> Option<Entity>;

    fn is_building(&self, entity: Entity) -> bool;
}

/// First building found walking up from `entity`, within
/// `MAX_OWNERSHIP_DEPTH` hops. Cycles and overly deep chains yield `None`.
pub fn owning_building(graph: &impl OwnershipGraph, entity: Entity) -> Option<Entity> {
    let mut current = entity;
    for _ in 0..MAX_OWNERSHIP_DEPTH {
        let owner = graph.owner_of(current)?;
        if graph.is_building(owner) {
            return Some(owner);
        }
        current = owner;
    }
    None
}

/// Whether the first building above `lane` is `building`.
pub fn lane_belongs_to_building(graph: &impl OwnershipGraph, lane: Entity, building: Entity) -> bool {
    owning_building(graph, lane) == Some(building)
}
