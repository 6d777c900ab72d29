use super::OrderTrigger;
use crate::error::FoodError;
use crate::model::Order;
use crate::store::Tables;
use tracing::warn;

/// Before an order is inserted, rejects it if its delivery agent already has an order.
///
/// The count covers every order on record for the agent, whatever its status.
/// The count and the insert run in one actor step, and open transactions are
/// serialized, so two concurrent inserts for one agent cannot both pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgentAvailabilityGuard;

impl OrderTrigger for AgentAvailabilityGuard {
    fn name(&self) -> &'static str {
        "check_delivery_agent_availability_before_order"
    }

    fn before_insert(&self, new: &Order, tables: &Tables) -> Result<(), FoodError> {
        let assigned = tables.orders_for_agent(new.delivery_agent_id).count();
        if assigned >= 1 {
            warn!(agent_id = %new.delivery_agent_id, assigned, order_id = %new.id, "Delivery agent unavailable");
            return Err(FoodError::agent_unavailable());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderCreate, STATUS_COMPLETED};
    use crate::store::TableWriter;

    #[test]
    fn test_counts_orders_of_any_status() {
        let mut tables = Tables::default();
        let mut changes = Vec::new();
        let mut existing = Order::from(OrderCreate::new(1, 101, 7, 10.0));
        existing.status = STATUS_COMPLETED.to_string();
        TableWriter::new(&mut tables, &mut changes).put_order(existing);

        let same_agent = Order::from(OrderCreate::new(2, 102, 7, 20.0));
        let other_agent = Order::from(OrderCreate::new(3, 102, 8, 20.0));

        assert_eq!(
            AgentAvailabilityGuard.before_insert(&same_agent, &tables),
            Err(FoodError::agent_unavailable())
        );
        assert_eq!(AgentAvailabilityGuard.before_insert(&other_agent, &tables), Ok(()));
    }
}
