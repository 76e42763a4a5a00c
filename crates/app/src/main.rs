//! Headless parking pricing demo.
//!
//! Spawns a small seeded city, runs the simulation for a number of days while
//! parking demand rises and falls, and logs every pricing cycle.
//!
//! Environment:
//! - `PARKING_PRICING_SETTINGS`: path to a JSON settings file.
//! - `PARKING_DEMO_DAYS`: simulated days to run (default 1).
//! - `PARKING_DEMO_SEED`: RNG seed for the demo city (default 42).

mod demo_city;
mod settings_file;

use bevy::log::LogPlugin;
use bevy::prelude::*;

use parking_pricing::pipeline::ParkingPricingStats;
use parking_pricing::pricing::TICKS_PER_DAY;
use parking_pricing::ParkingPricingPlugin;

use demo_city::{DemoCityPlugin, DemoSeed};

const DEFAULT_DAYS: u64 = 1;

fn main() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins(LogPlugin::default());

    if let Ok(path) = std::env::var(settings_file::SETTINGS_ENV) {
        app.insert_resource(settings_file::load_settings(path.as_ref()));
    }
    let seed = env_u64("PARKING_DEMO_SEED").unwrap_or(demo_city::DEFAULT_SEED);
    let days = env_u64("PARKING_DEMO_DAYS").unwrap_or(DEFAULT_DAYS);

    app.insert_resource(DemoSeed(seed))
        .add_plugins((ParkingPricingPlugin, DemoCityPlugin));

    // Initial update so Startup systems spawn the city.
    app.update();

    info!("Running parking pricing demo for {days} day(s) with seed {seed}");
    for _ in 0..days * TICKS_PER_DAY {
        app.world_mut().run_schedule(FixedUpdate);
    }

    let stats = app.world().resource::<ParkingPricingStats>();
    info!(
        "Demo finished: {} cycles completed, {} skipped, {} aborted",
        stats.cycles_completed, stats.cycles_skipped, stats.cycles_aborted
    );
}

fn env_u64(name: &str) -> Option<u64> {
    let value = std::env::var(name).ok()?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!("Ignoring {name}={value}: {err}");
            None
        }
    }
}
