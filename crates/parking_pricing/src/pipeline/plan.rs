use bevy::prelude::*;

use crate::policies::ParkingFeePrefabs;
use crate::pricing::{ParkingPricingSettings, PriceBand};

use super::error::PricingError;
use super::snapshot::SnapshotRequest;
use super::types::PricingCategory;

/// How one category is priced this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPlan {
    pub band: PriceBand,
    /// Policy kind receiving the price.
    pub policy: Entity,
}

/// Categories priced by one cycle, fixed at cycle start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CyclePlan {
    pub street: Option<CategoryPlan>,
    pub lot: Option<CategoryPlan>,
}

impl CyclePlan {
    /// Plan from the current settings and resolved policy kinds. A category
    /// is priced when it is enabled and its policy kind is known.
    pub fn new(
        settings: Option<&ParkingPricingSettings>,
        prefabs: &ParkingFeePrefabs,
    ) -> Result<Self, PricingError> {
        let settings = settings.ok_or(PricingError::SettingsMissing)?;
        let mut plan = Self::default();
        for category in PricingCategory::ALL {
            if !settings.is_enabled(category) {
                continue;
            }
            match plan_category(settings, prefabs, category) {
                Ok(planned) => *plan.slot_mut(category) = Some(planned),
                Err(err) => debug!("Skipping {} pricing: {err}", category.label()),
            }
        }
        Ok(plan)
    }

    pub fn get(&self, category: PricingCategory) -> Option<&CategoryPlan> {
        match category {
            PricingCategory::Street => self.street.as_ref(),
            PricingCategory::Lot => self.lot.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.street.is_none() && self.lot.is_none()
    }

    pub fn snapshot_request(&self) -> SnapshotRequest {
        SnapshotRequest {
            districts: self.street.is_some(),
            lot_policy: self.lot.map(|l| l.policy),
        }
    }

    fn slot_mut(&mut self, category: PricingCategory) -> &mut Option<CategoryPlan> {
        match category {
            PricingCategory::Street => &mut self.street,
            PricingCategory::Lot => &mut self.lot,
        }
    }
}

fn plan_category(
    settings: &ParkingPricingSettings,
    prefabs: &ParkingFeePrefabs,
    category: PricingCategory,
) -> Result<CategoryPlan, PricingError> {
    let policy = prefabs
        .get(category)
        .ok_or(PricingError::PolicyKindNotFound(category))?;
    Ok(CategoryPlan {
        band: settings.category(category).price_band(),
        policy,
    })
}
