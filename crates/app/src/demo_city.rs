//! A small seeded city whose parking demand follows a daily wave.

use std::f64::consts::TAU;

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use parking_pricing::curve::Bezier;
use parking_pricing::network::{
    BorderDistrict, Building, CarLane, Curve, District, GarageLane, LaneNodes, LaneObject,
    LaneObjects, LaneOverlap, LaneOverlaps, NodeId, Owner, ParkedCar, ParkingLane,
    ParkingLaneData, ParkingOffsets, PrefabRef, Road, SubLanes,
};
use parking_pricing::pipeline::ParkingPricingStats;
use parking_pricing::policies::{
    ParkingFeePrefabs, Policies, Policy, PolicyOption, PolicyPrefab, PolicyStore,
};
use parking_pricing::pricing::TICKS_PER_DAY;
use parking_pricing::{SimulationSet, TickCounter};

pub const DEFAULT_SEED: u64 = 42;

const DISTRICT_GRID: u32 = 2;
const ROADS_PER_DISTRICT: u32 = 12;
const BUILDINGS_PER_DISTRICT: u32 = 6;
/// Ticks between parking churn passes.
const CHURN_INTERVAL: u64 = 256;
/// Curb length assumed per parked car when deriving demand targets.
const CURB_PER_CAR: f32 = 6.0;
const CAR_LENGTH: f32 = 4.5;

/// Seed for the demo city's RNG.
#[derive(Resource, Clone, Copy)]
pub struct DemoSeed(pub u64);

#[derive(Resource)]
struct DemoRng(ChaCha8Rng);

/// Street curb lanes the demo parks cars on, with their target spot count.
#[derive(Component)]
struct DemoCurb {
    spots: usize,
}

pub struct DemoCityPlugin;

impl Plugin for DemoCityPlugin {
    fn build(&self, app: &mut App) {
        let seed = app
            .world()
            .get_resource::<DemoSeed>()
            .map_or(DEFAULT_SEED, |s| s.0);
        app.insert_resource(DemoRng(ChaCha8Rng::seed_from_u64(seed)))
            .add_systems(Startup, spawn_demo_city)
            .add_systems(
                FixedUpdate,
                churn_parking
                    .after(parking_pricing::advance_tick)
                    .in_set(SimulationSet::PreSim),
            )
            .add_systems(FixedUpdate, report_prices.in_set(SimulationSet::PostSim));
    }
}

/// Share of parking wanted at `tick`: low at night, peaking mid-day.
fn daily_demand(tick: u64) -> f64 {
    let phase = (tick % TICKS_PER_DAY) as f64 / TICKS_PER_DAY as f64;
    0.5 - 0.45 * (phase * TAU).cos()
}

fn spawn_demo_city(mut commands: Commands, mut rng: ResMut<DemoRng>) {
    let rng = &mut rng.0;
    commands.spawn(PolicyPrefab {
        option: PolicyOption::StreetParkingFee,
    });
    let lot_fee = commands
        .spawn(PolicyPrefab {
            option: PolicyOption::LotParkingFee,
        })
        .id();
    let street_lane = commands.spawn(ParkingLaneData::continuous(0.0)).id();
    let lot_lane = commands.spawn(ParkingLaneData::slotted(5.5)).id();

    let mut next_node = 0u32;
    let mut node = || {
        next_node += 1;
        NodeId(next_node)
    };

    let districts: Vec<Entity> = (0..DISTRICT_GRID * DISTRICT_GRID)
        .map(|_| commands.spawn((District, Policies::default())).id())
        .collect();

    for (i, &district) in districts.iter().enumerate() {
        for r in 0..ROADS_PER_DISTRICT {
            // Every fourth road borders the next district.
            let right = if r % 4 == 0 {
                districts[(i + 1) % districts.len()]
            } else {
                district
            };
            let road = commands
                .spawn((
                    Road,
                    BorderDistrict {
                        left: Some(district),
                        right: Some(right),
                    },
                ))
                .id();

            let length = rng.gen_range(40.0..140.0);
            let curb_nodes = LaneNodes {
                start: node(),
                middle: node(),
                end: node(),
            };
            let mut overlaps = Vec::new();
            if rng.gen_bool(0.3) {
                let start = rng.gen_range(60u8..180);
                overlaps.push(LaneOverlap {
                    this_start: start,
                    this_end: start + 12,
                });
            }
            let curb = commands
                .spawn((
                    ParkingLane::default(),
                    Curve(Bezier::line(Vec3::ZERO, Vec3::new(length, 0.0, 0.0))),
                    curb_nodes,
                    PrefabRef(street_lane),
                    Owner(road),
                    LaneObjects::default(),
                    LaneOverlaps(overlaps),
                    DemoCurb {
                        spots: (length / CURB_PER_CAR) as usize,
                    },
                ))
                .id();
            let travel = commands
                .spawn((
                    LaneNodes {
                        start: node(),
                        middle: curb_nodes.start,
                        end: node(),
                    },
                    CarLane::default(),
                    Owner(road),
                ))
                .id();
            commands.entity(road).insert(SubLanes(vec![curb, travel]));
        }

        for b in 0..BUILDINGS_PER_DISTRICT {
            let priced = b % 3 != 0;
            let policies = if priced {
                Policies(vec![Policy::new(lot_fee, 0)])
            } else {
                Policies::default()
            };
            let building = commands.spawn((Building, policies)).id();
            let lot = commands.spawn(Owner(building)).id();
            let length = rng.gen_range(30.0..80.0);
            commands.spawn((
                ParkingLane::default(),
                Curve(Bezier::line(Vec3::ZERO, Vec3::new(length, 0.0, 0.0))),
                LaneNodes {
                    start: node(),
                    middle: node(),
                    end: node(),
                },
                PrefabRef(lot_lane),
                Owner(lot),
                LaneObjects::default(),
                LaneOverlaps::default(),
            ));
            commands.spawn((
                GarageLane {
                    vehicle_capacity: rng.gen_range(40..200),
                    vehicle_count: 0,
                },
                Owner(building),
            ));
        }
    }

    info!(
        "Spawned demo city: {} districts, {} roads, {} buildings",
        districts.len(),
        districts.len() as u32 * ROADS_PER_DISTRICT,
        districts.len() as u32 * BUILDINGS_PER_DISTRICT
    );
}

/// Park and unpark cars, fill garages and queue traffic toward the current
/// demand level.
fn churn_parking(
    tick: Res<TickCounter>,
    mut commands: Commands,
    mut rng: ResMut<DemoRng>,
    mut curbs: Query<(&DemoCurb, &mut LaneObjects)>,
    mut lots: Query<&mut LaneObjects, (With<ParkingLane>, Without<DemoCurb>)>,
    mut garages: Query<&mut GarageLane>,
    mut travel_lanes: Query<&mut CarLane>,
) {
    if tick.0 % CHURN_INTERVAL != 0 {
        return;
    }
    let rng = &mut rng.0;
    let demand = daily_demand(tick.0);

    for (curb, mut objects) in &mut curbs {
        let target = (curb.spots as f64 * demand).round() as usize;
        adjust_occupants(&mut commands, rng, &mut objects, target);
    }
    for mut objects in &mut lots {
        let target = (8.0 * demand).round() as usize;
        adjust_occupants(&mut commands, rng, &mut objects, target);
    }
    for mut garage in &mut garages {
        let jitter = rng.gen_range(-0.1..0.1);
        let fill = (demand + jitter).clamp(0.0, 1.0);
        garage.vehicle_count = (f64::from(garage.vehicle_capacity) * fill).round() as u16;
    }
    for mut lane in &mut travel_lanes {
        *lane = if rng.gen_bool(demand * 0.2) {
            let start = rng.gen_range(0u8..200);
            CarLane::blocked(start, start.saturating_add(40))
        } else {
            CarLane::UNBLOCKED
        };
    }
}

/// Park or remove one car to move a lane toward `target` occupants.
fn adjust_occupants(
    commands: &mut Commands,
    rng: &mut ChaCha8Rng,
    objects: &mut LaneObjects,
    target: usize,
) {
    if objects.0.len() < target {
        let car = commands
            .spawn((ParkedCar, ParkingOffsets::centered(CAR_LENGTH)))
            .id();
        let position = rng.gen_range(0.02..0.98);
        objects.0.push(LaneObject {
            object: car,
            curve_position: Vec2::splat(position),
        });
        objects
            .0
            .sort_by(|a, b| a.curve_position.x.total_cmp(&b.curve_position.x));
    } else if objects.0.len() > target {
        let idx = rng.gen_range(0..objects.0.len());
        let removed = objects.0.remove(idx);
        commands.entity(removed.object).despawn();
    }
}

/// Log average prices after every completed cycle.
fn report_prices(
    tick: Res<TickCounter>,
    stats: Res<ParkingPricingStats>,
    prefabs: Res<ParkingFeePrefabs>,
    mut last_reported: Local<u64>,
    districts: Query<&Policies, With<District>>,
    buildings: Query<&Policies, With<Building>>,
) {
    if stats.cycles_completed == *last_reported {
        return;
    }
    *last_reported = stats.cycles_completed;

    let street = prefabs.street.map(|kind| average_price(districts.iter(), kind));
    let lot = prefabs.lot.map(|kind| average_price(buildings.iter(), kind));
    info!(
        "Day {:.2} (demand {:.0}%): street {}, lot {}, {} updates applied",
        tick.0 as f64 / TICKS_PER_DAY as f64,
        daily_demand(tick.0) * 100.0,
        format_average(street),
        format_average(lot),
        stats.updates_applied
    );
}

/// Mean price and number of priced entities.
fn average_price<'a>(policies: impl Iterator<Item = &'a Policies>, kind: Entity) -> (f64, usize) {
    let prices: Vec<i32> = policies.filter_map(|p| p.price(kind)).collect();
    if prices.is_empty() {
        return (0.0, 0);
    }
    let total: i32 = prices.iter().sum();
    (f64::from(total) / prices.len() as f64, prices.len())
}

fn format_average(average: Option<(f64, usize)>) -> String {
    match average {
        Some((_, 0)) | None => "not priced".to_string(),
        Some((price, count)) => format!("avg ${price:.1} over {count}"),
    }
}
