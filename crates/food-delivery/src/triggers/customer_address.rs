use super::OrderTrigger;
use crate::error::FoodError;
use crate::model::Order;
use crate::store::TableWriter;
use tracing::debug;

/// After an order is inserted, copies its address onto the customer.
///
/// Unconditional: an order without an address clears the customer's address.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerAddressSync;

impl OrderTrigger for CustomerAddressSync {
    fn name(&self) -> &'static str {
        "update_customer_address_after_order"
    }

    fn after_insert(&self, new: &Order, writer: &mut TableWriter<'_>) -> Result<(), FoodError> {
        let affected = writer.update_customer(new.customer_id, |customer| {
            customer.address = new.address.clone();
        });
        debug!(customer_id = %new.customer_id, affected, "Customer address synced");
        Ok(())
    }
}
