//! Lazy discovery of the parking-fee policy prefabs.

use bevy::prelude::*;

use crate::pipeline::PricingCategory;

use super::types::{PolicyOption, PolicyPrefab};

/// Resolved parking-fee policy kinds.
///
/// A kind stays `None` until a matching `PolicyPrefab` exists. Each missing
/// kind is warned about once per session.
#[derive(Resource, Debug, Clone, Default)]
pub struct ParkingFeePrefabs {
    pub street: Option<Entity>,
    pub lot: Option<Entity>,
    warned_street: bool,
    warned_lot: bool,
}

impl ParkingFeePrefabs {
    pub fn get(&self, category: PricingCategory) -> Option<Entity> {
        match category {
            PricingCategory::Street => self.street,
            PricingCategory::Lot => self.lot,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.street.is_some() && self.lot.is_some()
    }

    /// Fill unresolved kinds from the given prefabs.
    ///
    /// Returns the categories that are still missing after the scan and have
    /// not been warned about yet; they are marked as warned.
    pub fn resolve<'a>(
        &mut self,
        prefabs: impl IntoIterator<Item = (Entity, &'a PolicyPrefab)>,
    ) -> Vec<PricingCategory> {
        for (entity, prefab) in prefabs {
            match prefab.option {
                PolicyOption::StreetParkingFee if self.street.is_none() => {
                    info!("Found Roadside Parking Fee prefab: {entity}");
                    self.street = Some(entity);
                }
                PolicyOption::LotParkingFee if self.lot.is_none() => {
                    info!("Found Lot Parking Fee prefab: {entity}");
                    self.lot = Some(entity);
                }
                _ => {}
            }
        }

        let mut newly_missing = Vec::new();
        if self.street.is_none() && !self.warned_street {
            self.warned_street = true;
            newly_missing.push(PricingCategory::Street);
        }
        if self.lot.is_none() && !self.warned_lot {
            self.warned_lot = true;
            newly_missing.push(PricingCategory::Lot);
        }
        newly_missing
    }
}

/// System: resolve parking-fee policy kinds until both are known.
pub fn resolve_parking_fee_prefabs(
    mut prefabs: ResMut<ParkingFeePrefabs>,
    query: Query<(Entity, &PolicyPrefab)>,
) {
    if prefabs.is_resolved() {
        return;
    }
    for category in prefabs.resolve(query.iter()) {
        warn!(
            "Could not find '{}' policy prefab; {} pricing is skipped until it appears",
            category.policy_name(),
            category.label()
        );
    }
}
