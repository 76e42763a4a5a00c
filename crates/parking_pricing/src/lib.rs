//! Occupancy-driven parking prices for a simulated city.
//!
//! Periodically measures how full street parking is in every district and how
//! full lot parking is at every building that charges for it, then moves each
//! one's parking-fee policy price toward a target occupancy.
//!
//! - `curve` / `network`: the road-network model the pipeline reads.
//! - `utilization`: per-lane capacity geometry and per-entity aggregation.
//! - `pricing`: the utilization-to-price function and its settings.
//! - `policies`: policy records and parking-fee kind discovery.
//! - `pipeline`: snapshot, parallel compute and deferred apply, driven by
//!   `FixedUpdate` systems.

use bevy::prelude::*;

pub mod curve;
pub mod network;
pub mod pipeline;
pub mod policies;
pub mod pricing;
pub mod simulation_sets;
pub mod utilization;

#[cfg(test)]
pub mod test_harness;

pub use simulation_sets::SimulationSet;

use pipeline::{
    apply_price_updates, check_pricing_settings, collect_pricing_results, start_pricing_cycle,
    ParkingPricingStats, PriceUpdateQueue, PricingCycleState,
};
use policies::{resolve_parking_fee_prefabs, ParkingFeePrefabs};
use pricing::ParkingPricingSettings;

/// Simulation ticks elapsed, advanced once per `FixedUpdate`.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

pub fn advance_tick(mut tick: ResMut<TickCounter>) {
    tick.0 = tick.0.wrapping_add(1);
}

/// Registers the pricing resources and systems.
///
/// Settings are initialized to defaults unless the host inserted its own
/// `ParkingPricingSettings` before adding the plugin.
pub struct ParkingPricingPlugin;

impl Plugin for ParkingPricingPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::PreSim,
                SimulationSet::Simulation,
                SimulationSet::PostSim,
            )
                .chain(),
        );

        app.init_resource::<TickCounter>()
            .init_resource::<ParkingPricingSettings>()
            .init_resource::<ParkingFeePrefabs>()
            .init_resource::<PricingCycleState>()
            .init_resource::<PriceUpdateQueue>()
            .init_resource::<ParkingPricingStats>()
            .add_systems(Startup, check_pricing_settings)
            .add_systems(FixedUpdate, advance_tick.in_set(SimulationSet::PreSim))
            .add_systems(
                FixedUpdate,
                (
                    resolve_parking_fee_prefabs,
                    start_pricing_cycle,
                    collect_pricing_results,
                    apply_price_updates,
                )
                    .chain()
                    .in_set(SimulationSet::Simulation),
            );
    }
}
