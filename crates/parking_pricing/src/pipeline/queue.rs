//! Deferred price mutations.
//!
//! Worker tasks never touch the world. Their results become commands in a
//! queue that the main thread drains after the computation finishes, checking
//! each target again since it may have been removed in the meantime.

use bevy::prelude::*;

use crate::policies::{Policies, PolicyStore};
use crate::utilization::UtilizationResult;

use super::error::PricingError;
use super::plan::CyclePlan;
use super::types::PriceUpdateCommand;

/// A sink for deferred price updates.
pub trait MutationQueue {
    fn enqueue_set_price(&mut self, command: PriceUpdateCommand);
}

impl MutationQueue for Vec<PriceUpdateCommand> {
    fn enqueue_set_price(&mut self, command: PriceUpdateCommand) {
        self.push(command);
    }
}

/// Price updates waiting to be applied on the main thread.
#[derive(Resource, Debug, Default)]
pub struct PriceUpdateQueue {
    pending: Vec<PriceUpdateCommand>,
}

impl PriceUpdateQueue {
    pub fn pending(&self) -> &[PriceUpdateCommand] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, PriceUpdateCommand> {
        self.pending.drain(..)
    }
}

impl MutationQueue for PriceUpdateQueue {
    fn enqueue_set_price(&mut self, command: PriceUpdateCommand) {
        self.pending.push(command);
    }
}

/// Turn utilization results into price commands. Results of a category the
/// plan does not price are dropped. Returns the number of commands queued.
pub fn enqueue_prices(
    queue: &mut impl MutationQueue,
    plan: &CyclePlan,
    results: &[UtilizationResult],
) -> usize {
    let mut queued = 0;
    for result in results {
        let Some(category) = plan.get(result.category) else {
            continue;
        };
        queue.enqueue_set_price(PriceUpdateCommand {
            target: result.target,
            category: result.category,
            policy: category.policy,
            new_price: category.band.price_for(result.utilization),
            utilization: result.utilization,
        });
        queued += 1;
    }
    queued
}

/// Write one price into its target's policy records.
pub fn apply_price_update(
    policies: &mut Query<Option<&mut Policies>>,
    command: &PriceUpdateCommand,
) -> Result<(), PricingError> {
    match policies.get_mut(command.target) {
        Err(_) => Err(PricingError::StaleEntity(command.target)),
        Ok(None) => Err(PricingError::MissingPolicyRecord(command.target)),
        Ok(Some(mut records)) => {
            records.set_price(command.policy, command.new_price);
            Ok(())
        }
    }
}
