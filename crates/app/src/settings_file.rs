//! Loading `ParkingPricingSettings` from a JSON file.

use std::path::Path;

use bevy::prelude::*;

use parking_pricing::pricing::ParkingPricingSettings;

/// Environment variable naming the settings file.
pub const SETTINGS_ENV: &str = "PARKING_PRICING_SETTINGS";

/// Read settings from `path`. Unreadable or malformed files fall back to the
/// defaults with a warning; missing fields take their default values.
pub fn load_settings(path: &Path) -> ParkingPricingSettings {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!(
                "Could not read parking pricing settings from {}: {err}; using defaults",
                path.display()
            );
            return ParkingPricingSettings::default();
        }
    };
    match serde_json::from_str(&text) {
        Ok(settings) => {
            info!("Loaded parking pricing settings from {}", path.display());
            settings
        }
        Err(err) => {
            warn!(
                "Invalid parking pricing settings in {}: {err}; using defaults",
                path.display()
            );
            ParkingPricingSettings::default()
        }
    }
}
