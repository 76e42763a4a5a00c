//! Immutable copy of the parking state read by one pricing cycle.
//!
//! The snapshot is taken on the main thread at cycle start and shared by all
//! worker tasks through an `Arc`. Nothing in it refers back into the world
//! except entity ids, which are validated again when prices are applied.

use std::collections::{HashMap, HashSet};

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::curve::{Bezier, CurveRange};
use crate::network::{
    BorderDistrict, Building, CarLane, Curve, District, GarageLane, LaneNodes, LaneObjects,
    LaneOverlaps, NodeId, Owner, ParkedCar, ParkingLane, ParkingLaneData, ParkingLaneFlags,
    ParkingOffsets, PrefabRef, SubLanes, Unspawned,
};
use crate::policies::{Policies, PolicyStore};
use crate::utilization::{blocked_range, CurbLaneView, Occupant, OwnershipGraph};

/// A curb parking lane as captured at cycle start.
#[derive(Debug, Clone, PartialEq)]
pub struct CurbLaneRecord {
    pub lane: Entity,
    pub owner: Option<Entity>,
    pub curve: Bezier,
    pub flags: ParkingLaneFlags,
    pub data: ParkingLaneData,
    pub start_node: NodeId,
    /// Objects on the lane, in curve order.
    pub occupants: Vec<Occupant>,
    /// Overlap ranges sorted by start.
    pub overlaps: Vec<CurveRange>,
}

impl CurbLaneRecord {
    pub fn view(&self, blocked: CurveRange) -> CurbLaneView<'_> {
        CurbLaneView {
            curve: &self.curve,
            flags: self.flags,
            data: &self.data,
            occupants: &self.occupants,
            overlaps: &self.overlaps,
            blocked,
        }
    }
}

/// A garage lane counter as captured at cycle start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GarageLaneRecord {
    pub lane: Entity,
    pub capacity: u32,
    pub count: u32,
}

/// A travel lane's nodes and queue blockage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelLaneRecord {
    pub nodes: LaneNodes,
    pub blockage: Option<CurveRange>,
}

/// Everything a pricing cycle reads.
#[derive(Debug, Clone, Default)]
pub struct PricingSnapshot {
    /// Districts to price.
    pub districts: Vec<Entity>,
    /// Buildings to price; only those already holding a lot-fee policy.
    pub buildings: Vec<Entity>,
    pub curb_lanes: Vec<CurbLaneRecord>,
    pub garage_lanes: Vec<GarageLaneRecord>,
    /// Direct ownership edges.
    pub owners: HashMap<Entity, Entity>,
    /// Every building, priced or not.
    pub building_entities: HashSet<Entity>,
    pub border_districts: HashMap<Entity, BorderDistrict>,
    pub sub_lanes: HashMap<Entity, Vec<Entity>>,
    pub travel_lanes: HashMap<Entity, TravelLaneRecord>,
}

impl PricingSnapshot {
    /// Blocked range of a curb lane from the travel lanes of its owner.
    pub fn blocked_range(&self, lane: &CurbLaneRecord) -> CurveRange {
        let Some(siblings) = lane.owner.and_then(|o| self.sub_lanes.get(&o)) else {
            return CurveRange::EMPTY;
        };
        blocked_range(
            lane.start_node,
            siblings
                .iter()
                .filter_map(|s| self.travel_lanes.get(s))
                .map(|t| (&t.nodes, t.blockage)),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty() && self.buildings.is_empty()
    }
}

impl OwnershipGraph for PricingSnapshot {
    fn owner_of(&self, entity: Entity) -> Option<Entity> {
        self.owners.get(&entity).copied()
    }

    fn is_building(&self, entity: Entity) -> bool {
        self.building_entities.contains(&entity)
    }
}

/// What a cycle needs captured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotRequest {
    pub districts: bool,
    /// Lot-fee policy kind; buildings are captured when set.
    pub lot_policy: Option<Entity>,
}

/// Read-only world access used to build a [`PricingSnapshot`].
#[derive(SystemParam)]
pub struct PricingWorld<'w, 's> {
    districts: Query<'w, 's, Entity, With<District>>,
    buildings: Query<'w, 's, (Entity, Option<&'static Policies>), With<Building>>,
    curb_lanes: Query<
        'w,
        's,
        (
            Entity,
            &'static ParkingLane,
            &'static Curve,
            &'static LaneNodes,
            &'static PrefabRef,
            Option<&'static Owner>,
            Option<&'static LaneObjects>,
            Option<&'static LaneOverlaps>,
        ),
    >,
    lane_prefabs: Query<'w, 's, &'static ParkingLaneData>,
    vehicles: Query<'w, 's, (Has<ParkedCar>, Has<Unspawned>, Option<&'static ParkingOffsets>)>,
    garage_lanes: Query<'w, 's, (Entity, &'static GarageLane)>,
    owners: Query<'w, 's, (Entity, &'static Owner)>,
    borders: Query<'w, 's, (Entity, &'static BorderDistrict)>,
    sub_lanes: Query<'w, 's, (Entity, &'static SubLanes)>,
    travel_lanes: Query<'w, 's, (Entity, &'static LaneNodes, &'static CarLane)>,
}

impl PricingWorld<'_, '_> {
    pub fn snapshot(&self, request: SnapshotRequest) -> PricingSnapshot {
        let districts = if request.districts {
            self.districts.iter().collect()
        } else {
            Vec::new()
        };

        let buildings = match request.lot_policy {
            Some(policy) => self
                .buildings
                .iter()
                .filter(|(_, policies)| policies.is_some_and(|p| p.has_policy(policy)))
                .map(|(entity, _)| entity)
                .collect(),
            None => Vec::new(),
        };

        let mut curb_lanes = Vec::new();
        for (lane, parking, curve, nodes, prefab, owner, objects, overlaps) in &self.curb_lanes {
            let Ok(data) = self.lane_prefabs.get(prefab.0) else {
                debug!("Parking lane {lane} has no lane data on prefab {}", prefab.0);
                continue;
            };
            let mut overlaps: Vec<CurveRange> = overlaps
                .map(|o| o.0.iter().map(|overlap| overlap.range()).collect())
                .unwrap_or_default();
            overlaps.sort_by(|a, b| a.min.total_cmp(&b.min));
            curb_lanes.push(CurbLaneRecord {
                lane,
                owner: owner.map(|o| o.0),
                curve: curve.0,
                flags: parking.flags,
                data: *data,
                start_node: nodes.start,
                occupants: objects.map(|o| self.occupants(o)).unwrap_or_default(),
                overlaps,
            });
        }

        PricingSnapshot {
            districts,
            buildings,
            curb_lanes,
            garage_lanes: self
                .garage_lanes
                .iter()
                .map(|(lane, garage)| GarageLaneRecord {
                    lane,
                    capacity: u32::from(garage.vehicle_capacity),
                    count: u32::from(garage.vehicle_count),
                })
                .collect(),
            owners: self.owners.iter().map(|(e, o)| (e, o.0)).collect(),
            building_entities: self.buildings.iter().map(|(e, _)| e).collect(),
            border_districts: self.borders.iter().map(|(e, b)| (e, *b)).collect(),
            sub_lanes: self.sub_lanes.iter().map(|(e, s)| (e, s.0.clone())).collect(),
            travel_lanes: self
                .travel_lanes
                .iter()
                .map(|(e, nodes, car)| {
                    (
                        e,
                        TravelLaneRecord {
                            nodes: *nodes,
                            blockage: car.blockage(),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Objects that no longer exist count as present but not parked.
    fn occupants(&self, objects: &LaneObjects) -> Vec<Occupant> {
        let mut occupants: Vec<Occupant> = objects
            .0
            .iter()
            .map(|object| {
                let (parked, unspawned, offsets) = self
                    .vehicles
                    .get(object.object)
                    .map(|(p, u, o)| (p, u, o.copied().unwrap_or_default()))
                    .unwrap_or_default();
                Occupant {
                    position: object.curve_position.x,
                    parked,
                    unspawned,
                    offsets,
                }
            })
            .collect();
        occupants.sort_by(|a, b| a.position.total_cmp(&b.position));
        occupants
    }
}
