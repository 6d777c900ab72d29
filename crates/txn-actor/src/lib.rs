//! # Transaction Actor
//!
//! This crate provides a single-owner, in-memory unit-of-work coordinator built on
//! the **Actor Model**. One Tokio task owns the state; everyone else talks to it
//! through message passing.
//!
//! ## Why an Actor?
//!
//! - **Atomic statements for free**: the actor runs one request at a time, so a
//!   statement together with every follow-on write it triggers is indivisible.
//! - **Serializable transactions**: while a session holds a transaction, other
//!   sessions queue. A rule that counts rows and then inserts cannot race.
//! - **No locks on the data**: the state is exclusively owned by the task.
//!
//! ## Core Concepts
//!
//! ### The `Database` Trait
//! [`Database`] is the contract for anything the actor can own: run a statement and
//! report its changes, revert a change, answer a query. Schemas and rules live
//! entirely on the implementor's side.
//!
//! ### Undo Log & Savepoints
//! Every statement in a transaction appends its changes to an [`UndoLog`].
//! Savepoints are markers in that log. `ROLLBACK TO` truncates to the marker and
//! reverts the truncated changes newest first; `ROLLBACK` reverts everything.
//!
//! ### Clients and Sessions
//! - [`DatabaseClient`]: cloneable, autocommit. Each statement is its own unit of work.
//! - [`Session`]: a connection with `begin`, `savepoint`, `rollback_to`, `release`,
//!   `commit`, `rollback`.
//!
//! ### Errors
//! [`TxError`] separates a rejected statement ([`TxError::Statement`], transaction
//! still open) from one that aborted the whole transaction ([`TxError::Aborted`]).
//! A database opts into the latter per error via [`Database::aborts_transaction`].
//!
//! ## Module Tour
//!
//! - [`database`]: the [`Database`] trait.
//! - [`actor`]: [`DatabaseActor`], the request loop and transaction bookkeeping.
//! - [`client`] / [`session`]: caller-side handles.
//! - [`client_trait`]: [`StoreClient`], shared plumbing for domain clients.
//! - [`undo`]: [`UndoLog`].
//! - [`mock`]: [`MockClient`](mock::MockClient) for client-logic tests.
//! - [`tracing`]: subscriber setup.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod database;
pub mod error;
pub mod message;
pub mod mock;
pub mod session;
pub mod tracing;
pub mod undo;

pub use actor::DatabaseActor;
pub use client::DatabaseClient;
pub use client_trait::StoreClient;
pub use database::Database;
pub use error::TxError;
pub use message::{Request, Response, SessionId};
pub use session::Session;
pub use undo::UndoLog;
