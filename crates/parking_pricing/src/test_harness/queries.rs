//! Query and simulation-tick methods for `TestCity`.

use std::time::Duration;

use bevy::prelude::*;

use crate::pipeline::{CyclePhase, ParkingPricingStats, PriceUpdateQueue, PricingCycleState};
use crate::policies::{Policies, Policy};
use crate::pricing::{pricing_interval, ParkingPricingSettings};
use crate::TickCounter;

use super::TestCity;

/// Upper bound on ticks spent waiting for a cycle's worker tasks.
const MAX_CYCLE_WAIT_TICKS: u32 = 2_000;

impl TestCity {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed-update ticks by directly executing the `FixedUpdate`
    /// schedule, bypassing Bevy's virtual time.
    ///
    /// A `yield_now()` is inserted between ticks so that the
    /// `AsyncComputeTaskPool` threads get a chance to make progress.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
            std::thread::yield_now();
        }
    }

    /// Current pricing interval in ticks.
    pub fn pricing_interval(&self) -> u64 {
        pricing_interval(self.app.world().get_resource::<ParkingPricingSettings>())
    }

    /// Jump the tick counter to just before the next pricing boundary and run
    /// the tick that reaches it.
    pub fn tick_to_next_boundary(&mut self) {
        let interval = self.pricing_interval();
        {
            let mut tick = self.app.world_mut().resource_mut::<TickCounter>();
            let next = (tick.0 / interval + 1) * interval;
            tick.0 = next - 1;
        }
        self.tick(1);
    }

    /// Reach the next pricing boundary and keep ticking until the cycle it
    /// started has been applied. Returns `false` when no cycle started.
    pub fn run_pricing_cycle(&mut self) -> bool {
        let completed = self.stats().cycles_completed;
        self.tick_to_next_boundary();
        for _ in 0..MAX_CYCLE_WAIT_TICKS {
            if self.cycle_phase() == CyclePhase::Idle {
                return self.stats().cycles_completed > completed;
            }
            std::thread::sleep(Duration::from_millis(1));
            self.tick(1);
        }
        panic!("pricing cycle did not finish within {MAX_CYCLE_WAIT_TICKS} ticks");
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Access the ECS world mutably.
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn stats(&self) -> &ParkingPricingStats {
        self.resource::<ParkingPricingStats>()
    }

    pub fn cycle_phase(&self) -> CyclePhase {
        self.resource::<PricingCycleState>().phase()
    }

    pub fn queued_updates(&self) -> usize {
        self.resource::<PriceUpdateQueue>().pending().len()
    }

    /// The street parking-fee kind spawned by `with_parking_fee_policies`.
    pub fn street_fee(&self) -> Entity {
        self.street_fee
            .expect("call with_parking_fee_policies() first")
    }

    /// The lot parking-fee kind spawned by `with_parking_fee_policies`.
    pub fn lot_fee(&self) -> Entity {
        self.lot_fee.expect("call with_parking_fee_policies() first")
    }

    /// Policy record of `kind` on `entity`.
    pub fn policy(&self, entity: Entity, kind: Entity) -> Option<Policy> {
        self.app
            .world()
            .get::<Policies>(entity)?
            .0
            .iter()
            .find(|p| p.policy == kind)
            .copied()
    }

    pub fn street_price(&self, district: Entity) -> Option<i32> {
        self.policy(district, self.street_fee())
            .map(|p| p.adjustment)
    }

    pub fn lot_price(&self, building: Entity) -> Option<i32> {
        self.policy(building, self.lot_fee()).map(|p| p.adjustment)
    }
}
