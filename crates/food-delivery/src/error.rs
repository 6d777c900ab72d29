//! Error types for the food-delivery store and its clients.

use thiserror::Error;
use txn_actor::TxError;

/// Message raised when an order names a delivery agent who already has one.
pub const AGENT_UNAVAILABLE: &str = "Delivery agent is currently unavailable";

/// Errors that can occur during store operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FoodError {
    /// A rule rejected the write before anything was stored.
    #[error("{0}")]
    ConstraintViolation(String),

    /// A row with this key already exists.
    #[error("Duplicate key {key} in {table}")]
    DuplicateKey { table: &'static str, key: String },

    /// A referenced row does not exist, or a referencing row still does.
    #[error("Foreign key violation: {table}.{column} = {key}")]
    ForeignKeyViolation {
        table: &'static str,
        column: &'static str,
        key: String,
    },

    #[error("View already exists: {0}")]
    ViewAlreadyExists(String),

    #[error("View not found: {0}")]
    ViewNotFound(String),

    /// A follow-on write made by a trigger failed. Aborts the enclosing transaction.
    #[error("Trigger {trigger} failed: {source}")]
    TriggerFailed {
        trigger: &'static str,
        source: Box<FoodError>,
    },

    /// The store answered a query with the wrong kind of result.
    #[error("Unexpected query result: {0}")]
    UnexpectedResult(String),

    /// An error from the transaction layer (closed actor, missing savepoint, ...).
    #[error("Store error: {0}")]
    Store(String),
}

impl FoodError {
    pub fn agent_unavailable() -> Self {
        FoodError::ConstraintViolation(AGENT_UNAVAILABLE.to_string())
    }
}

/// Recovers the domain error carried inside a statement failure, so callers can
/// match on `ConstraintViolation` and friends directly.
impl From<TxError> for FoodError {
    fn from(e: TxError) -> Self {
        match e.source_as::<FoodError>() {
            Some(inner) => inner.clone(),
            None => FoodError::Store(e.to_string()),
        }
    }
}
