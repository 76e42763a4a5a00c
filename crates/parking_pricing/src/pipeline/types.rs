use bevy::prelude::*;

/// The two kinds of priced parking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PricingCategory {
    /// Curb parking along roads, priced per district.
    Street,
    /// Lot and garage parking, priced per building.
    Lot,
}

impl PricingCategory {
    pub const ALL: [PricingCategory; 2] = [PricingCategory::Street, PricingCategory::Lot];

    /// Name of the matching policy kind.
    pub fn policy_name(self) -> &'static str {
        match self {
            PricingCategory::Street => "Roadside Parking Fee",
            PricingCategory::Lot => "Lot Parking Fee",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PricingCategory::Street => "street",
            PricingCategory::Lot => "lot",
        }
    }

    /// Kind of entity priced in this category.
    pub fn target_kind(self) -> &'static str {
        match self {
            PricingCategory::Street => "district",
            PricingCategory::Lot => "building",
        }
    }
}

/// A deferred request to set a parking price on a district or building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceUpdateCommand {
    pub target: Entity,
    pub category: PricingCategory,
    /// Policy kind receiving the price.
    pub policy: Entity,
    pub new_price: i32,
    /// Utilization that produced the price, for logging.
    pub utilization: f64,
}
