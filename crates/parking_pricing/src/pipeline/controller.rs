//! Pricing cycle controller.
//!
//! ```text
//! Idle ──tick % interval == 0──▶ Snapshotting ──▶ Computing ──all tasks done──▶ Applying ──▶ Idle
//!                                                  │
//!           tick % interval == 0 while busy ───────┘ skipped, counted
//! ```
//!
//! A cycle snapshots the world on the main thread, computes one utilization
//! per district and building on the async compute pool, then converts the
//! results into queued price commands that are applied on the main thread.
//! Cycles never overlap: a boundary reached while a cycle is in flight is
//! skipped.

use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::{block_on, AsyncComputeTaskPool, Task};
use futures_lite::future;

use crate::policies::{ParkingFeePrefabs, Policies};
use crate::pricing::{pricing_interval, ParkingPricingSettings};
use crate::utilization::{building_utilization, district_utilization, UtilizationResult};
use crate::TickCounter;

use super::error::PricingError;
use super::plan::CyclePlan;
use super::queue::{apply_price_update, enqueue_prices, PriceUpdateQueue};
use super::snapshot::{PricingSnapshot, PricingWorld};
use super::types::PricingCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePhase {
    #[default]
    Idle,
    Snapshotting,
    Computing,
    Applying,
}

/// Work of the cycle currently computing.
pub struct InFlightCycle {
    pub(crate) started_at: u64,
    pub(crate) plan: CyclePlan,
    pub(crate) tasks: Vec<Task<UtilizationResult>>,
    pub(crate) results: Vec<UtilizationResult>,
}

impl InFlightCycle {
    /// Move every finished task's result into `results`.
    fn poll(&mut self) {
        let InFlightCycle { tasks, results, .. } = self;
        tasks.retain_mut(|task| match block_on(future::poll_once(task)) {
            Some(result) => {
                results.push(result);
                false
            }
            None => true,
        });
    }

    fn is_finished(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Phase of the pricing pipeline and the in-flight cycle, if any.
#[derive(Resource, Default)]
pub struct PricingCycleState {
    phase: CyclePhase,
    in_flight: Option<InFlightCycle>,
}

impl PricingCycleState {
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Whether a previous cycle has not finished yet.
    pub fn is_busy(&self) -> bool {
        self.phase != CyclePhase::Idle
    }

    /// Worker tasks of the in-flight cycle still running.
    pub fn pending_tasks(&self) -> usize {
        self.in_flight.as_ref().map_or(0, |c| c.tasks.len())
    }

    pub(crate) fn begin(&mut self, cycle: InFlightCycle) {
        self.phase = CyclePhase::Computing;
        self.in_flight = Some(cycle);
    }
}

/// Running counters of the pricing pipeline.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ParkingPricingStats {
    pub cycles_started: u64,
    /// Boundaries reached while a previous cycle was still running.
    pub cycles_skipped: u64,
    pub cycles_completed: u64,
    /// Cycles that could not dispatch their work.
    pub cycles_aborted: u64,
    /// Tick at which the last completed cycle started.
    pub last_cycle_tick: u64,
    pub districts_priced: usize,
    pub buildings_priced: usize,
    pub updates_applied: usize,
    pub updates_failed: usize,
}

/// Startup check for the settings resource.
pub fn check_pricing_settings(settings: Option<Res<ParkingPricingSettings>>) {
    if settings.is_none() {
        warn!("{}; using the default update interval", PricingError::SettingsMissing);
    }
}

/// System: at every interval boundary, snapshot the world and dispatch one
/// utilization task per district and building.
pub fn start_pricing_cycle(
    tick: Res<TickCounter>,
    settings: Option<Res<ParkingPricingSettings>>,
    prefabs: Res<ParkingFeePrefabs>,
    mut state: ResMut<PricingCycleState>,
    mut stats: ResMut<ParkingPricingStats>,
    world: PricingWorld,
) {
    let interval = pricing_interval(settings.as_deref());
    if tick.0 == 0 || tick.0 % interval != 0 {
        return;
    }

    if state.is_busy() {
        stats.cycles_skipped += 1;
        debug!(
            "Parking pricing cycle still running at tick {}, skipping this update",
            tick.0
        );
        return;
    }

    let plan = match CyclePlan::new(settings.as_deref(), &prefabs) {
        Ok(plan) => plan,
        Err(err) => {
            warn!("Skipping parking pricing update: {err}");
            return;
        }
    };
    if plan.is_empty() {
        return;
    }

    state.phase = CyclePhase::Snapshotting;
    let snapshot = world.snapshot(plan.snapshot_request());
    if snapshot.is_empty() {
        state.phase = CyclePhase::Idle;
        debug!(
            "No districts or buildings to price at tick {}, skipping this update",
            tick.0
        );
        return;
    }
    let snapshot = Arc::new(snapshot);
    info!(
        "Starting parking pricing cycle at tick {}: {} districts, {} buildings, {} curb lanes, {} garage lanes",
        tick.0,
        snapshot.districts.len(),
        snapshot.buildings.len(),
        snapshot.curb_lanes.len(),
        snapshot.garage_lanes.len()
    );

    match dispatch(&snapshot) {
        Ok((tasks, results)) => {
            state.begin(InFlightCycle {
                started_at: tick.0,
                plan,
                tasks,
                results,
            });
            stats.cycles_started += 1;
        }
        Err(err) => {
            state.phase = CyclePhase::Idle;
            stats.cycles_aborted += 1;
            error!("Parking pricing cycle aborted: {err}");
        }
    }
}

/// Spawn one task per priced entity. Without worker threads the results are
/// computed inline instead.
fn dispatch(
    snapshot: &Arc<PricingSnapshot>,
) -> Result<(Vec<Task<UtilizationResult>>, Vec<UtilizationResult>), PricingError> {
    if cfg!(target_arch = "wasm32") {
        return Ok((Vec::new(), compute_inline(snapshot)));
    }

    let pool = AsyncComputeTaskPool::try_get().ok_or(PricingError::TaskPoolUnavailable)?;
    let mut tasks = Vec::with_capacity(snapshot.districts.len() + snapshot.buildings.len());
    for &district in &snapshot.districts {
        let snapshot = Arc::clone(snapshot);
        tasks.push(pool.spawn(async move { district_utilization(&snapshot, district) }));
    }
    for &building in &snapshot.buildings {
        let snapshot = Arc::clone(snapshot);
        tasks.push(pool.spawn(async move { building_utilization(&snapshot, building) }));
    }
    Ok((tasks, Vec::new()))
}

fn compute_inline(snapshot: &PricingSnapshot) -> Vec<UtilizationResult> {
    let districts = snapshot
        .districts
        .iter()
        .map(|&d| district_utilization(snapshot, d));
    let buildings = snapshot
        .buildings
        .iter()
        .map(|&b| building_utilization(snapshot, b));
    districts.chain(buildings).collect()
}

/// System: once every task of the in-flight cycle is done, turn the results
/// into queued price commands.
pub fn collect_pricing_results(
    tick: Res<TickCounter>,
    mut state: ResMut<PricingCycleState>,
    mut queue: ResMut<PriceUpdateQueue>,
    mut stats: ResMut<ParkingPricingStats>,
) {
    if state.phase != CyclePhase::Computing {
        return;
    }
    if state.in_flight.is_none() {
        state.phase = CyclePhase::Idle;
        return;
    }
    let Some(mut cycle) = state.in_flight.take_if(|cycle| {
        cycle.poll();
        cycle.is_finished()
    }) else {
        return;
    };

    cycle
        .results
        .sort_by_key(|r| (r.category == PricingCategory::Lot, r.target));
    let queued = enqueue_prices(&mut *queue, &cycle.plan, &cycle.results);

    stats.last_cycle_tick = cycle.started_at;
    stats.districts_priced = count_category(&cycle.results, PricingCategory::Street);
    stats.buildings_priced = count_category(&cycle.results, PricingCategory::Lot);
    state.phase = CyclePhase::Applying;
    debug!(
        "Parking pricing results ready after {} ticks, {queued} updates queued",
        tick.0.wrapping_sub(cycle.started_at)
    );
}

fn count_category(results: &[UtilizationResult], category: PricingCategory) -> usize {
    results.iter().filter(|r| r.category == category).count()
}

/// System: apply queued price commands. A failed command is logged and does
/// not affect the others.
pub fn apply_price_updates(
    mut state: ResMut<PricingCycleState>,
    mut queue: ResMut<PriceUpdateQueue>,
    mut stats: ResMut<ParkingPricingStats>,
    mut policies: Query<Option<&mut Policies>>,
) {
    if state.phase != CyclePhase::Applying {
        return;
    }

    let mut applied = 0;
    let mut failed = 0;
    for command in queue.drain() {
        match apply_price_update(&mut policies, &command) {
            Ok(()) => {
                applied += 1;
                info!(
                    "Updated {} parking policy for {} {}: ${} (utilization {:.2}%)",
                    command.category.label(),
                    command.category.target_kind(),
                    command.target,
                    command.new_price,
                    command.utilization * 100.0
                );
            }
            Err(err) => {
                failed += 1;
                error!(
                    "Failed to apply {} parking price to {}: {err}",
                    command.category.label(),
                    command.target
                );
            }
        }
    }

    stats.updates_applied = applied;
    stats.updates_failed = failed;
    stats.cycles_completed += 1;
    state.phase = CyclePhase::Idle;
    info!("Parking pricing cycle complete: {applied} updates applied, {failed} failed");
}
