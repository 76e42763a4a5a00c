//! Price-policy records attached to districts and buildings.
//!
//! A district or building carries a `Policies` list. Each entry references a
//! policy prefab (the policy "kind") and stores an adjustment, which for the
//! parking-fee kinds is the price. The street and lot parking-fee kinds are
//! discovered from `PolicyPrefab` entities at runtime via
//! `ParkingFeePrefabs`.

pub mod prefabs;
pub mod types;


pub use prefabs::*;
pub use types::*;
