//! # TestCity: headless integration test harness for parking pricing
//!
//! Wraps `bevy::app::App` + `ParkingPricingPlugin` so tests can build a small
//! road network, park cars, run pricing cycles and inspect the resulting
//! policy prices without a window or renderer.

mod queries;
mod setup;

use bevy::app::App;
use bevy::prelude::*;

use crate::ParkingPricingPlugin;

pub use spawning::CurbLaneSpec;

/// A headless Bevy App wrapping `ParkingPricingPlugin` for integration testing.
///
/// Use builder methods to set up the network, then call `run_pricing_cycle()`
/// (or `tick()`) and query the resulting ECS state.
pub struct TestCity {
    app: App,
    street_fee: Option<Entity>,
    lot_fee: Option<Entity>,
    next_node: u32,
}

impl TestCity {
    /// Create an empty city with default settings and no policy prefabs.
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(ParkingPricingPlugin);

        // Run one update so Startup systems execute.
        app.update();

        Self {
            app,
            street_fee: None,
            lot_fee: None,
            next_node: 1,
        }
    }
}

impl Default for TestCity {
    fn default() -> Self {
        Self::new()
    }
}
