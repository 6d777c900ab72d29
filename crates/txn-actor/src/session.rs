//! # Sessions
//!
//! A `Session` is one caller's connection to the database actor, and the only way
//! to run an explicit transaction.

use crate::database::Database;
use crate::error::TxError;
use crate::message::{Request, Response, SessionId};
use tokio::sync::{mpsc, oneshot};
use tracing::{instrument, warn};

/// A connection that can open, checkpoint, and close units of work.
///
/// ```text
/// START TRANSACTION;           session.begin().await?;
/// INSERT ...;                  session.execute(stmt).await?;
/// SAVEPOINT order_insert;      session.savepoint("order_insert").await?;
/// INSERT ...;                  session.execute(stmt).await?;
/// ROLLBACK TO order_insert;    session.rollback_to("order_insert").await?;
/// COMMIT;                      session.commit().await?;
/// ```
///
/// While a transaction is open, every other session waits. Dropping a session
/// with an open transaction rolls it back.
pub struct Session<D: Database> {
    id: SessionId,
    sender: mpsc::Sender<Request<D>>,
}

impl<D: Database> Session<D> {
    pub(crate) fn new(id: SessionId, sender: mpsc::Sender<Request<D>>) -> Self {
        Self { id, sender }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn begin(&self) -> Result<(), TxError> {
        let session = self.id;
        self.call(|respond_to| Request::Begin {
            session,
            respond_to,
        })
        .await
    }

    /// Runs a statement inside the open transaction, or autocommits it if there is none.
    pub async fn execute(&self, statement: D::Statement) -> Result<D::Outcome, TxError> {
        let session = Some(self.id);
        self.call(|respond_to| Request::Execute {
            session,
            statement,
            respond_to,
        })
        .await
    }

    pub async fn query(&self, query: D::Query) -> Result<D::QueryResult, TxError> {
        let session = Some(self.id);
        self.call(|respond_to| Request::Query {
            session,
            query,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn savepoint(&self, name: &str) -> Result<(), TxError> {
        let (session, name) = (self.id, name.to_string());
        self.call(|respond_to| Request::Savepoint {
            session,
            name,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn rollback_to(&self, name: &str) -> Result<(), TxError> {
        let (session, name) = (self.id, name.to_string());
        self.call(|respond_to| Request::RollbackTo {
            session,
            name,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn release(&self, name: &str) -> Result<(), TxError> {
        let (session, name) = (self.id, name.to_string());
        self.call(|respond_to| Request::Release {
            session,
            name,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn commit(&self) -> Result<(), TxError> {
        let session = self.id;
        self.call(|respond_to| Request::Commit {
            session,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn rollback(&self) -> Result<(), TxError> {
        let session = self.id;
        self.call(|respond_to| Request::Rollback {
            session,
            respond_to,
        })
        .await
    }

    async fn call<T>(
        &self,
        make: impl FnOnce(Response<T>) -> Request<D>,
    ) -> Result<T, TxError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| TxError::ActorClosed)?;
        response.await.map_err(|_| TxError::ActorDropped)?
    }
}

impl<D: Database> Drop for Session<D> {
    fn drop(&mut self) {
        let request = Request::Close { session: self.id };
        match self.sender.try_send(request) {
            Ok(()) | Err(mpsc::error::TrySendError::Closed(_)) => {}
            Err(mpsc::error::TrySendError::Full(request)) => {
                match tokio::runtime::Handle::try_current() {
                    Ok(handle) => {
                        let sender = self.sender.clone();
                        handle.spawn(async move {
                            let _ = sender.send(request).await;
                        });
                    }
                    Err(_) => warn!(session = %self.id, "Session dropped outside runtime, close not sent"),
                }
            }
        }
    }
}
