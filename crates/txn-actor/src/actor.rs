//! # Database Actor
//!
//! This module defines the `DatabaseActor`, the task that owns a [`Database`] and
//! runs every statement, query, and transaction-control request against it.
//! Requests are processed sequentially, so each statement (including any
//! follow-on writes its database performs) is atomic with respect to every other.

use crate::client::DatabaseClient;
use crate::database::Database;
use crate::error::TxError;
use crate::message::{Request, Response, SessionId};
use crate::undo::UndoLog;
use std::collections::VecDeque;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The transaction currently holding the database.
struct ActiveTransaction<C> {
    session: SessionId,
    log: UndoLog<C>,
}

/// The actor that owns a database and coordinates units of work on it.
///
/// # Concurrency Model
/// The actor processes one message at a time, which makes a single statement
/// atomic for free. Transactions span several messages, so the actor also
/// serializes them: while one session has a transaction open, requests from
/// every other session (and autocommit requests) wait in `pending` and are
/// replayed in arrival order once that transaction commits or rolls back.
///
/// This gives serializable isolation without locks on the state itself. A
/// check-then-write inside a transaction (count rows, then insert) cannot be
/// interleaved with another writer.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `DatabaseActor::new()` to get the `actor` and a `client`.
/// 2.  **Run**: Spawn `actor.run()` in a background task.
/// 3.  **Use**: Execute autocommit statements on the client, or open a
///     [`Session`](crate::Session) for explicit transactions.
pub struct DatabaseActor<D: Database> {
    receiver: mpsc::Receiver<Request<D>>,
    db: D,
    active: Option<ActiveTransaction<D::Change>>,
    pending: VecDeque<Request<D>>,
    next_session: u32,
}

impl<D: Database> DatabaseActor<D> {
    /// Creates a new `DatabaseActor` owning `db`, and its associated `DatabaseClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    /// * `db` - The initial database state.
    pub fn new(buffer_size: usize, db: D) -> (Self, DatabaseClient<D>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            db,
            active: None,
            pending: VecDeque::new(),
            next_session: 1,
        };
        (actor, DatabaseClient::new(sender))
    }

    /// Runs the actor's event loop until every client and session is dropped.
    pub async fn run(mut self) {
        let db_type = std::any::type_name::<D>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(db_type, "Database actor started");

        while let Some(request) = self.receiver.recv().await {
            self.dispatch(request);
        }

        if let Some(tx) = self.active.take() {
            warn!(db_type, session = %tx.session, "Open transaction at shutdown, rolling back");
            self.revert_all(tx.log.into_reverted());
        }
        info!(db_type, "Shutdown");
    }

    /// Handles a request now, or parks it if another session holds a transaction.
    fn dispatch(&mut self, request: Request<D>) {
        if self.is_blocked(&request) {
            debug!(session = ?request.session(), queued = self.pending.len() + 1, "Waiting for transaction");
            self.pending.push_back(request);
        } else {
            self.handle(request);
        }
    }

    fn is_blocked(&self, request: &Request<D>) -> bool {
        let Some(tx) = &self.active else {
            return false;
        };
        if matches!(request, Request::Open { .. } | Request::Close { .. }) {
            return false;
        }
        request.session() != Some(tx.session)
    }

    /// Replays parked requests after a transaction ends. Requests that are
    /// blocked again (because a parked `Begin` started a new transaction) go
    /// back into the queue in their original order.
    fn drain_pending(&mut self) {
        let queued = std::mem::take(&mut self.pending);
        for request in queued {
            self.dispatch(request);
        }
    }

    fn handle(&mut self, request: Request<D>) {
        match request {
            Request::Open { respond_to } => {
                let id = SessionId(self.next_session);
                self.next_session += 1;
                debug!(session = %id, "Session opened");
                let _ = respond_to.send(Ok(id));
            }
            Request::Begin {
                session,
                respond_to,
            } => {
                if self.active.is_some() {
                    warn!(%session, "Begin inside an open transaction");
                    let _ = respond_to.send(Err(TxError::TransactionInProgress));
                    return;
                }
                if respond_to.is_closed() {
                    debug!(%session, "Begin abandoned before it started");
                    return;
                }
                self.active = Some(ActiveTransaction {
                    session,
                    log: UndoLog::new(),
                });
                info!(%session, "Transaction started");
                if respond_to.send(Ok(())).is_err() {
                    // Nobody is waiting on this transaction; it must not hold the store.
                    warn!(%session, "Begin abandoned by caller, ending transaction");
                    self.active = None;
                    self.drain_pending();
                }
            }
            Request::Execute {
                session,
                statement,
                respond_to,
            } => {
                let result = self.execute(session, statement);
                let _ = respond_to.send(result);
            }
            Request::Query {
                session,
                query,
                respond_to,
            } => {
                debug!(?session, ?query, "Query");
                let result = self
                    .db
                    .query(query)
                    .map_err(|e| TxError::Statement(Box::new(e)));
                let _ = respond_to.send(result);
            }
            Request::Savepoint {
                session,
                name,
                respond_to,
            } => {
                let result = match self.owned_log(session) {
                    Some(log) => {
                        log.savepoint(name.clone());
                        info!(%session, savepoint = %name, "Savepoint");
                        Ok(())
                    }
                    None => Err(TxError::NoActiveTransaction),
                };
                let _ = respond_to.send(result);
            }
            Request::RollbackTo {
                session,
                name,
                respond_to,
            } => {
                let result = self.rollback_to(session, &name);
                let _ = respond_to.send(result);
            }
            Request::Release {
                session,
                name,
                respond_to,
            } => {
                let result = match self.owned_log(session) {
                    Some(log) => log.release(&name),
                    None => Err(TxError::SavepointNotFound(name)),
                };
                let _ = respond_to.send(result);
            }
            Request::Commit {
                session,
                respond_to,
            } => {
                self.commit(session, respond_to);
            }
            Request::Rollback {
                session,
                respond_to,
            } => {
                self.rollback(session);
                let _ = respond_to.send(Ok(()));
            }
            Request::Close { session } => {
                let queued = self.pending.len();
                self.pending.retain(|r| r.session() != Some(session));
                let discarded = queued - self.pending.len();
                if discarded > 0 {
                    debug!(%session, discarded, "Dropped queued requests of closed session");
                }
                if self.owned_log(session).is_some() {
                    warn!(%session, "Session dropped with open transaction");
                    self.rollback(session);
                }
                debug!(%session, "Session closed");
            }
        }
    }

    fn owned_log(&mut self, session: SessionId) -> Option<&mut UndoLog<D::Change>> {
        self.active
            .as_mut()
            .filter(|tx| tx.session == session)
            .map(|tx| &mut tx.log)
    }

    fn execute(
        &mut self,
        session: Option<SessionId>,
        statement: D::Statement,
    ) -> Result<D::Outcome, TxError> {
        debug!(?session, ?statement, "Execute");
        let mut changes = Vec::new();
        match self.db.execute(statement, &mut changes) {
            Ok(outcome) => {
                let autocommit = match session.and_then(|s| self.owned_log(s)) {
                    Some(log) => {
                        log.record(changes);
                        false
                    }
                    None => true,
                };
                info!(?session, ?outcome, autocommit, "Executed");
                Ok(outcome)
            }
            Err(e) => {
                warn!(?session, error = %e, reverted = changes.len(), "Statement failed");
                changes.reverse();
                self.revert_all(changes);

                let aborts = D::aborts_transaction(&e);
                match session {
                    Some(s) if aborts && self.owned_log(s).is_some() => {
                        warn!(session = %s, "Statement failure aborts transaction");
                        self.rollback(s);
                        Err(TxError::Aborted(Box::new(e)))
                    }
                    _ => Err(TxError::Statement(Box::new(e))),
                }
            }
        }
    }

    fn rollback_to(&mut self, session: SessionId, name: &str) -> Result<(), TxError> {
        let Some(log) = self.owned_log(session) else {
            return Err(TxError::SavepointNotFound(name.to_string()));
        };
        let changes = log.rollback_to(name)?;
        let reverted = changes.len();
        self.revert_all(changes);
        info!(%session, savepoint = %name, reverted, "Rolled back to savepoint");
        Ok(())
    }

    fn commit(&mut self, session: SessionId, respond_to: Response<()>) {
        match self.active.take() {
            Some(tx) if tx.session == session => {
                info!(%session, changes = tx.log.len(), "Committed");
                let _ = respond_to.send(Ok(()));
                self.drain_pending();
            }
            other => {
                // Commit outside a transaction is a no-op.
                self.active = other;
                debug!(%session, "Commit with no transaction");
                let _ = respond_to.send(Ok(()));
            }
        }
    }

    /// Reverts and ends the session's transaction, if it holds one.
    fn rollback(&mut self, session: SessionId) {
        match self.active.take() {
            Some(tx) if tx.session == session => {
                let changes = tx.log.into_reverted();
                let reverted = changes.len();
                self.revert_all(changes);
                info!(%session, reverted, "Rolled back");
                self.drain_pending();
            }
            other => {
                self.active = other;
                debug!(%session, "Rollback with no transaction");
            }
        }
    }

    /// Reverts changes in the order given (callers pass newest first).
    fn revert_all(&mut self, changes: Vec<D::Change>) {
        for change in changes {
            self.db.revert(change);
        }
    }
}
