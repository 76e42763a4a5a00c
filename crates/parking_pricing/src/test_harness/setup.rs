//! Builder methods for policy kinds and settings in integration tests.

use crate::policies::{PolicyOption, PolicyPrefab};
use crate::pricing::{CategorySettings, ParkingPricingSettings, UpdateFrequency};

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Policy kinds and settings
    // -----------------------------------------------------------------------

    /// Spawn both parking-fee policy prefabs.
    pub fn with_parking_fee_policies(mut self) -> Self {
        let world = self.app.world_mut();
        self.street_fee = Some(
            world
                .spawn(PolicyPrefab {
                    option: PolicyOption::StreetParkingFee,
                })
                .id(),
        );
        self.lot_fee = Some(
            world
                .spawn(PolicyPrefab {
                    option: PolicyOption::LotParkingFee,
                })
                .id(),
        );
        self
    }

    /// Replace the street-parking settings.
    pub fn with_street_settings(mut self, street: CategorySettings) -> Self {
        self.settings_mut().street = street;
        self
    }

    /// Replace the lot-parking settings.
    pub fn with_lot_settings(mut self, lot: CategorySettings) -> Self {
        self.settings_mut().lot = lot;
        self
    }

    /// Enable street pricing with default values.
    pub fn with_street_pricing_enabled(self) -> Self {
        self.with_street_settings(CategorySettings {
            enabled: true,
            ..CategorySettings::street_defaults()
        })
    }

    pub fn with_update_frequency(mut self, frequency: UpdateFrequency) -> Self {
        self.settings_mut().update_frequency = frequency;
        self
    }

    /// Remove the settings resource entirely.
    pub fn without_settings(mut self) -> Self {
        self.app
            .world_mut()
            .remove_resource::<ParkingPricingSettings>();
        self
    }

    fn settings_mut(&mut self) -> bevy::prelude::Mut<'_, ParkingPricingSettings> {
        self.app
            .world_mut()
            .resource_mut::<ParkingPricingSettings>()
    }
}
