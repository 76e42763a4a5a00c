//! User-facing pricing configuration.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::pipeline::PricingCategory;

use super::calculator::PriceBand;
use super::constants::{
    FALLBACK_UPDATES_PER_DAY, MAX_PRICE_DISCOUNT_PCT, MAX_PRICE_INCREASE_PCT, MAX_STANDARD_PRICE,
    TICKS_PER_DAY,
};

/// How often prices are recomputed, in in-game minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpdateFrequency {
    Minutes22,
    #[default]
    Minutes45,
    Minutes90,
}

impl UpdateFrequency {
    pub fn updates_per_day(self) -> u64 {
        match self {
            UpdateFrequency::Minutes22 => 64,
            UpdateFrequency::Minutes45 => 32,
            UpdateFrequency::Minutes90 => 16,
        }
    }

    /// Ticks between two pricing cycles.
    pub fn interval_ticks(self) -> u64 {
        TICKS_PER_DAY / self.updates_per_day()
    }
}

/// Settings of one pricing category (street curbs or building lots).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySettings {
    pub enabled: bool,
    /// Occupancy the price curve is centered on, in percent. Not exposed in
    /// the options UI; the curve is fixed at 50.
    pub target_occupancy: u32,
    pub standard_price: u32,
    /// Maximum increase over the standard price, in percent.
    pub max_price_increase_pct: u32,
    /// Maximum discount from the standard price, in percent.
    pub max_price_discount_pct: u32,
}

impl CategorySettings {
    pub fn street_defaults() -> Self {
        Self {
            enabled: false,
            target_occupancy: 50,
            standard_price: 5,
            max_price_increase_pct: 200,
            max_price_discount_pct: 50,
        }
    }

    pub fn lot_defaults() -> Self {
        Self {
            enabled: true,
            target_occupancy: 50,
            standard_price: 10,
            max_price_increase_pct: 200,
            max_price_discount_pct: 50,
        }
    }

    /// Price band for these settings, with every value clamped to its
    /// slider range.
    pub fn price_band(&self) -> PriceBand {
        PriceBand::new(
            self.standard_price.min(MAX_STANDARD_PRICE) as i32,
            self.max_price_increase_pct.min(MAX_PRICE_INCREASE_PCT),
            self.max_price_discount_pct.min(MAX_PRICE_DISCOUNT_PCT),
        )
    }
}

/// Parking pricing configuration resource.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingPricingSettings {
    #[serde(default = "CategorySettings::street_defaults")]
    pub street: CategorySettings,
    #[serde(default = "CategorySettings::lot_defaults")]
    pub lot: CategorySettings,
    #[serde(default)]
    pub update_frequency: UpdateFrequency,
}

impl Default for ParkingPricingSettings {
    fn default() -> Self {
        Self {
            street: CategorySettings::street_defaults(),
            lot: CategorySettings::lot_defaults(),
            update_frequency: UpdateFrequency::default(),
        }
    }
}

impl ParkingPricingSettings {
    pub fn category(&self, category: PricingCategory) -> &CategorySettings {
        match category {
            PricingCategory::Street => &self.street,
            PricingCategory::Lot => &self.lot,
        }
    }

    pub fn is_enabled(&self, category: PricingCategory) -> bool {
        self.category(category).enabled
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }
}

/// Ticks between pricing cycles, falling back to 45 updates per day when
/// settings are unavailable.
pub fn pricing_interval(settings: Option<&ParkingPricingSettings>) -> u64 {
    match settings {
        Some(s) => s.update_frequency.interval_ticks(),
        None => TICKS_PER_DAY / FALLBACK_UPDATES_PER_DAY,
    }
}
