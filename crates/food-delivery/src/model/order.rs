//! Customer orders.
//!
//! Orders are the table the delivery rules watch: inserting one is guarded by
//! the delivery agent's availability and copies the address onto the customer,
//! and completing one completes its payment. See [`crate::triggers`].

use crate::model::{CustomerId, DeliveryAgentId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Status given to orders inserted without one.
pub const STATUS_PLACED: &str = "placed";

/// The status that completes an order and its payment.
pub const STATUS_COMPLETED: &str = "completed";

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub delivery_agent_id: DeliveryAgentId,
    /// Free-form label, e.g. "placed", "out for delivery", "completed".
    pub status: String,
    pub address: Option<String>,
    pub total: f64,
}

impl Order {
    pub fn is_completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }

    /// Applies a partial update in place.
    pub fn apply(&mut self, update: OrderUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(total) = update.total {
            self.total = total;
        }
    }
}

/// Payload for inserting a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub delivery_agent_id: DeliveryAgentId,
    pub total: f64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl OrderCreate {
    /// Mirrors `INSERT INTO orders (order_id, customer_id, da_id, total)`.
    pub fn new(id: u32, customer_id: u32, delivery_agent_id: u32, total: f64) -> Self {
        Self {
            id: OrderId(id),
            customer_id: CustomerId(customer_id),
            delivery_agent_id: DeliveryAgentId(delivery_agent_id),
            total,
            address: None,
            status: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

impl From<OrderCreate> for Order {
    fn from(params: OrderCreate) -> Self {
        Self {
            id: params.id,
            customer_id: params.customer_id,
            delivery_agent_id: params.delivery_agent_id,
            status: params.status.unwrap_or_else(|| STATUS_PLACED.to_string()),
            address: params.address,
            total: params.total,
        }
    }
}

/// Payload for updating an existing order. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub status: Option<String>,
    pub address: Option<String>,
    pub total: Option<f64>,
}

impl OrderUpdate {
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }
}
