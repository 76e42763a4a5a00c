use std::fmt;

use bevy::prelude::*;

use super::types::PricingCategory;

/// Errors raised while running a pricing cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// The target entity was despawned between snapshot and apply.
    StaleEntity(Entity),
    /// The target entity exists but carries no policy records.
    MissingPolicyRecord(Entity),
    /// No policy prefab of the category's kind exists.
    PolicyKindNotFound(PricingCategory),
    /// No worker pool is available to run the computation.
    TaskPoolUnavailable,
    /// The pricing settings resource is absent.
    SettingsMissing,
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::StaleEntity(entity) => {
                write!(f, "entity {entity} no longer exists")
            }
            PricingError::MissingPolicyRecord(entity) => {
                write!(f, "entity {entity} has no policy records")
            }
            PricingError::PolicyKindNotFound(category) => {
                write!(f, "{} policy prefab not found", category.policy_name())
            }
            PricingError::TaskPoolUnavailable => {
                write!(f, "async compute task pool is not initialized")
            }
            PricingError::SettingsMissing => {
                write!(f, "parking pricing settings not initialized")
            }
        }
    }
}

impl std::error::Error for PricingError {}
