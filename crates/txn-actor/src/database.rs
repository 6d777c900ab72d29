//! # Database Trait
//!
//! The contract a state type implements so a [`DatabaseActor`](crate::DatabaseActor)
//! can own it and run statements against it inside units of work.

use std::fmt::Debug;

/// State that can be owned and mutated by a `DatabaseActor`.
///
/// # Architecture Note
/// The actor knows nothing about tables, rows, or rules. It only knows how to:
/// - run a statement and collect the changes it made,
/// - undo a single change,
/// - answer a read-only query.
///
/// Everything domain specific (schemas, triggers, views) lives behind these
/// associated types, so the transaction machinery is written *once*.
///
/// # Undo Contract
/// `execute` must push one [`Database::Change`] for every mutation it applies,
/// in the order it applied them. Calling [`Database::revert`] on those changes
/// newest-first must restore the exact prior state. This holds even when
/// `execute` returns an error part way through: the actor reverts whatever was
/// pushed before reporting the failure.
pub trait Database: Send + 'static {
    /// A write request (insert, update, DDL, ...).
    type Statement: Send + Debug + 'static;

    /// What a successful statement reports back (e.g. rows affected).
    type Outcome: Send + Debug + 'static;

    /// A read-only request.
    type Query: Send + Debug + 'static;

    /// The answer to a [`Database::Query`].
    type QueryResult: Send + Debug + 'static;

    /// A single undo record.
    type Change: Send + Debug + 'static;

    /// The error type for statements and queries.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Applies a statement, recording every mutation in `changes`.
    fn execute(
        &mut self,
        statement: Self::Statement,
        changes: &mut Vec<Self::Change>,
    ) -> Result<Self::Outcome, Self::Error>;

    /// Undoes one change previously recorded by [`Database::execute`].
    fn revert(&mut self, change: Self::Change);

    /// Answers a read-only query against the current state.
    fn query(&self, query: Self::Query) -> Result<Self::QueryResult, Self::Error>;

    /// Whether a statement error must abort the whole enclosing transaction
    /// rather than only the failing statement.
    ///
    /// Defaults to `false`: the statement is reverted and the transaction stays open.
    fn aborts_transaction(_error: &Self::Error) -> bool {
        false
    }
}
