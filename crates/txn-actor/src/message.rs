//! # Messages
//!
//! The request enum sent from clients and sessions to the database actor.

use crate::database::Database;
use crate::error::TxError;
use std::fmt::Display;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, TxError>>;

/// Identifies a session. Assigned by the actor when the session is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u32);

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session_{}", self.0)
    }
}

/// Internal message type sent to the actor.
///
/// # Unit-of-Work Protocol
/// Requests map one-to-one onto the transaction control language:
///
/// - **Begin / Commit / Rollback**: open and close a unit of work.
/// - **Savepoint / RollbackTo / Release**: named checkpoints inside it.
/// - **Execute / Query**: statements and reads. A `session` of `None` means an
///   autocommit request that belongs to no session.
/// - **Close**: sent when a [`Session`](crate::Session) is dropped; rolls back
///   anything left open.
#[derive(Debug)]
pub enum Request<D: Database> {
    Open {
        respond_to: Response<SessionId>,
    },
    Begin {
        session: SessionId,
        respond_to: Response<()>,
    },
    Execute {
        session: Option<SessionId>,
        statement: D::Statement,
        respond_to: Response<D::Outcome>,
    },
    Query {
        session: Option<SessionId>,
        query: D::Query,
        respond_to: Response<D::QueryResult>,
    },
    Savepoint {
        session: SessionId,
        name: String,
        respond_to: Response<()>,
    },
    RollbackTo {
        session: SessionId,
        name: String,
        respond_to: Response<()>,
    },
    Release {
        session: SessionId,
        name: String,
        respond_to: Response<()>,
    },
    Commit {
        session: SessionId,
        respond_to: Response<()>,
    },
    Rollback {
        session: SessionId,
        respond_to: Response<()>,
    },
    Close {
        session: SessionId,
    },
}

impl<D: Database> Request<D> {
    /// The session a request belongs to, or `None` for `Open` and autocommit requests.
    pub fn session(&self) -> Option<SessionId> {
        match self {
            Request::Open { .. } => None,
            Request::Execute { session, .. } | Request::Query { session, .. } => *session,
            Request::Begin { session, .. }
            | Request::Savepoint { session, .. }
            | Request::RollbackTo { session, .. }
            | Request::Release { session, .. }
            | Request::Commit { session, .. }
            | Request::Rollback { session, .. }
            | Request::Close { session } => Some(*session),
        }
    }
}
