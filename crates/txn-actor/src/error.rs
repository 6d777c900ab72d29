//! # Error Types
//!
//! Errors raised by the transaction actor itself, plus wrappers that carry the
//! database's own error type across the channel boundary.

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur within the transaction actor.
#[derive(Debug, thiserror::Error)]
pub enum TxError {
    #[error("Database actor closed")]
    ActorClosed,
    #[error("Database actor dropped response channel")]
    ActorDropped,
    #[error("No active transaction")]
    NoActiveTransaction,
    #[error("Transaction already in progress")]
    TransactionInProgress,
    #[error("Savepoint does not exist: {0}")]
    SavepointNotFound(String),
    /// The statement was rejected and reverted; the transaction (if any) is still open.
    #[error("Statement failed: {0}")]
    Statement(BoxError),
    /// The statement failed and the whole enclosing transaction was rolled back.
    #[error("Transaction aborted: {0}")]
    Aborted(BoxError),
}

impl TxError {
    /// Returns the database error behind a `Statement` or `Aborted` failure,
    /// if it is of type `E`.
    pub fn source_as<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            TxError::Statement(e) | TxError::Aborted(e) => e.downcast_ref::<E>(),
            _ => None,
        }
    }
}
