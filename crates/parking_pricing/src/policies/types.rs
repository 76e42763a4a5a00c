//! Policy record types and the `PolicyStore` access trait.

use bevy::prelude::*;

/// What a policy prefab does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyOption {
    /// Paid parking on the curbs of a district ("Roadside Parking Fee").
    StreetParkingFee,
    /// Paid parking in a building's lot or garage ("Lot Parking Fee").
    LotParkingFee,
    /// Any unrelated policy.
    Other,
}

/// Component on policy prefab entities.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyPrefab {
    pub option: PolicyOption,
}

/// One policy applied to a district or building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    /// The policy prefab this record instantiates.
    pub policy: Entity,
    /// Price for parking-fee policies.
    pub adjustment: i32,
    pub active: bool,
}

impl Policy {
    pub fn new(policy: Entity, adjustment: i32) -> Self {
        Self {
            policy,
            adjustment,
            active: adjustment > 0,
        }
    }

    /// Set the price. A policy is active only while its price is positive.
    pub fn set_adjustment(&mut self, adjustment: i32) {
        self.adjustment = adjustment;
        self.active = adjustment > 0;
    }
}

/// Policies currently attached to a district or building.
#[derive(Component, Debug, Clone, Default)]
pub struct Policies(pub Vec<Policy>);

/// Read/write access to the policy records of a single entity.
pub trait PolicyStore {
    /// Whether a record of `kind` exists.
    fn has_policy(&self, kind: Entity) -> bool;

    /// The record of `kind`, appended inactive with a zero price if missing.
    fn get_or_create_policy(&mut self, kind: Entity) -> &mut Policy;

    /// Current price of `kind`, if a record exists.
    fn price(&self, kind: Entity) -> Option<i32>;

    /// Update the existing record of `kind` or add a new one.
    fn set_price(&mut self, kind: Entity, price: i32) {
        self.get_or_create_policy(kind).set_adjustment(price);
    }
}

impl PolicyStore for Policies {
    fn has_policy(&self, kind: Entity) -> bool {
        self.0.iter().any(|p| p.policy == kind)
    }

    fn get_or_create_policy(&mut self, kind: Entity) -> &mut Policy {
        match self.0.iter().position(|p| p.policy == kind) {
            Some(idx) => &mut self.0[idx],
            None => {
                self.0.push(Policy::new(kind, 0));
                let last = self.0.len() - 1;
                &mut self.0[last]
            }
        }
    }

    fn price(&self, kind: Entity) -> Option<i32> {
        self.0.iter().find(|p| p.policy == kind).map(|p| p.adjustment)
    }
}
