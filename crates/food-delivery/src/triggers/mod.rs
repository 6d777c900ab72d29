//! # Order Triggers (the Rule Evaluator)
//!
//! Rules that react to row-level events on the orders table. They run inside the
//! statement that fired them, so their writes commit or roll back with it.
//!
//! | Rule | Timing | Effect |
//! |------|--------|--------|
//! | [`PaymentStatusPropagation`] | after update | new status "completed" → payment status "completed" |
//! | [`AgentAvailabilityGuard`] | before insert | agent already has an order → `ConstraintViolation` |
//! | [`CustomerAddressSync`] | after insert | customer address ← order address |
//!
//! ## Hook Semantics
//!
//! - `before_insert` sees the candidate row and read-only tables. An error rejects
//!   the insert before anything is written; the transaction stays open.
//! - `after_insert` / `after_update` write through a [`TableWriter`]. An error is
//!   wrapped in [`FoodError::TriggerFailed`] and aborts the enclosing transaction.
//!
//! Triggers fire in registration order.

pub mod agent_availability;
pub mod customer_address;
pub mod payment_status;

pub use agent_availability::AgentAvailabilityGuard;
pub use customer_address::CustomerAddressSync;
pub use payment_status::PaymentStatusPropagation;

use crate::error::FoodError;
use crate::model::Order;
use crate::store::{TableWriter, Tables};
use std::fmt::Debug;
use std::sync::Arc;

/// A rule bound to lifecycle events on the orders table.
///
/// # Provided Methods (Hooks)
/// Every hook defaults to doing nothing, so a trigger implements only the
/// events it cares about.
pub trait OrderTrigger: Send + Sync + Debug {
    /// Name used in logs and in [`FoodError::TriggerFailed`].
    fn name(&self) -> &'static str;

    /// Called before a new order is written.
    fn before_insert(&self, _new: &Order, _tables: &Tables) -> Result<(), FoodError> {
        Ok(())
    }

    /// Called after a new order is written.
    fn after_insert(&self, _new: &Order, _writer: &mut TableWriter<'_>) -> Result<(), FoodError> {
        Ok(())
    }

    /// Called after an existing order is updated.
    fn after_update(
        &self,
        _old: &Order,
        _new: &Order,
        _writer: &mut TableWriter<'_>,
    ) -> Result<(), FoodError> {
        Ok(())
    }
}

/// The ordered set of triggers a store runs.
#[derive(Debug, Clone, Default)]
pub struct TriggerSet {
    triggers: Vec<Arc<dyn OrderTrigger>>,
}

impl TriggerSet {
    /// An empty set: orders are written with no rules applied.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The three delivery rules.
    pub fn standard() -> Self {
        Self::empty()
            .with(PaymentStatusPropagation)
            .with(AgentAvailabilityGuard)
            .with(CustomerAddressSync)
    }

    pub fn with(mut self, trigger: impl OrderTrigger + 'static) -> Self {
        self.triggers.push(Arc::new(trigger));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.triggers.iter().map(|t| t.name()).collect()
    }

    pub fn before_insert(&self, new: &Order, tables: &Tables) -> Result<(), FoodError> {
        for trigger in &self.triggers {
            trigger.before_insert(new, tables)?;
        }
        Ok(())
    }

    pub fn after_insert(&self, new: &Order, writer: &mut TableWriter<'_>) -> Result<(), FoodError> {
        for trigger in &self.triggers {
            trigger
                .after_insert(new, writer)
                .map_err(|e| wrap(trigger.name(), e))?;
        }
        Ok(())
    }

    pub fn after_update(
        &self,
        old: &Order,
        new: &Order,
        writer: &mut TableWriter<'_>,
    ) -> Result<(), FoodError> {
        for trigger in &self.triggers {
            trigger
                .after_update(old, new, writer)
                .map_err(|e| wrap(trigger.name(), e))?;
        }
        Ok(())
    }
}

fn wrap(trigger: &'static str, source: FoodError) -> FoodError {
    FoodError::TriggerFailed {
        trigger,
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_set_fires_in_registration_order() {
        assert_eq!(
            TriggerSet::standard().names(),
            vec![
                "update_payment_status_after_order",
                "check_delivery_agent_availability_before_order",
                "update_customer_address_after_order",
            ]
        );
        assert!(TriggerSet::empty().names().is_empty());
    }
}
