use super::OrderTrigger;
use crate::error::FoodError;
use crate::model::{Order, STATUS_COMPLETED};
use crate::store::TableWriter;
use tracing::debug;

/// After an order is updated to "completed", completes its payment.
///
/// Fires on every update whose new status is "completed", including one that
/// leaves an already completed order completed. An order with no payment is
/// not an error; zero rows are touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentStatusPropagation;

impl OrderTrigger for PaymentStatusPropagation {
    fn name(&self) -> &'static str {
        "update_payment_status_after_order"
    }

    fn after_update(
        &self,
        _old: &Order,
        new: &Order,
        writer: &mut TableWriter<'_>,
    ) -> Result<(), FoodError> {
        if !new.is_completed() {
            return Ok(());
        }
        let affected = writer.update_payments_for_order(new.id, |payment| {
            payment.status = STATUS_COMPLETED.to_string();
        });
        debug!(order_id = %new.id, affected, "Payment status propagated");
        Ok(())
    }
}
