use crate::model::OrderId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaymentId(pub u32);

impl From<u32> for PaymentId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "payment_{}", self.0)
    }
}

/// A payment against an order. One payment per order is assumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub amount: f64,
    /// e.g. "upi", "credit", "cash".
    pub mode: String,
    /// e.g. "in process", "completed".
    pub status: String,
}

impl Payment {
    /// Mirrors `INSERT INTO payment (payment_id, order_id, amount, mode, status)`.
    pub fn new(
        id: u32,
        order_id: u32,
        amount: f64,
        mode: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id: PaymentId(id),
            order_id: OrderId(order_id),
            amount,
            mode: mode.into(),
            status: status.into(),
        }
    }

    pub fn apply(&mut self, update: PaymentUpdate) {
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(mode) = update.mode {
            self.mode = mode;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// Payload for updating an existing payment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentUpdate {
    pub amount: Option<f64>,
    pub mode: Option<String>,
    pub status: Option<String>,
}
