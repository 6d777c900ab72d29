//! # Database Client
//!
//! The cloneable handle for talking to a [`DatabaseActor`](crate::DatabaseActor).

use crate::database::Database;
use crate::error::TxError;
use crate::message::Request;
use crate::session::Session;
use tokio::sync::{mpsc, oneshot};

/// ## DatabaseClient
///
/// Forwards requests to the actor over a Tokio mpsc channel and awaits the reply on
/// a oneshot channel. It holds only a sender, so cloning is cheap.
///
/// Statements sent through the client run in **autocommit** mode: each one is its
/// own unit of work. For multi-statement transactions, open a [`Session`].
pub struct DatabaseClient<D: Database> {
    sender: mpsc::Sender<Request<D>>,
}

impl<D: Database> Clone for DatabaseClient<D> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<D: Database> DatabaseClient<D> {
    pub fn new(sender: mpsc::Sender<Request<D>>) -> Self {
        Self { sender }
    }

    /// Runs one statement as its own unit of work.
    pub async fn execute(&self, statement: D::Statement) -> Result<D::Outcome, TxError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(Request::Execute {
                session: None,
                statement,
                respond_to,
            })
            .await
            .map_err(|_| TxError::ActorClosed)?;
        response.await.map_err(|_| TxError::ActorDropped)?
    }

    pub async fn query(&self, query: D::Query) -> Result<D::QueryResult, TxError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(Request::Query {
                session: None,
                query,
                respond_to,
            })
            .await
            .map_err(|_| TxError::ActorClosed)?;
        response.await.map_err(|_| TxError::ActorDropped)?
    }

    /// Opens a new session for explicit transaction control.
    pub async fn session(&self) -> Result<Session<D>, TxError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(Request::Open { respond_to })
            .await
            .map_err(|_| TxError::ActorClosed)?;
        let id = response.await.map_err(|_| TxError::ActorDropped)??;
        Ok(Session::new(id, self.sender.clone()))
    }
}
