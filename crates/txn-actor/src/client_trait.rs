//! # StoreClient Trait
//!
//! Provides a common interface for domain-specific clients, adding default
//! `execute` and `query` methods built on top of a generic `DatabaseClient`.
use crate::{Database, DatabaseClient, TxError};
use async_trait::async_trait;

/// Trait for domain clients to inherit autocommit statement and query plumbing.
///
/// Implementors only say where their `DatabaseClient` is and how transaction
/// errors become their own error type.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// pub struct OrderClient {
///     inner: DatabaseClient<FoodDb>,
/// }
///
/// #[async_trait]
/// impl StoreClient<FoodDb> for OrderClient {
///     type Error = FoodError;
///
///     fn inner(&self) -> &DatabaseClient<FoodDb> {
///         &self.inner
///     }
/// }
///
/// // execute() and query() are provided automatically.
/// let rows = order_client.execute(Statement::DeleteOrder(OrderId(1))).await?;
/// ```
#[async_trait]
pub trait StoreClient<D: Database>: Send + Sync {
    /// The domain-specific error type.
    type Error: From<TxError> + Send;

    /// Access the inner generic DatabaseClient.
    fn inner(&self) -> &DatabaseClient<D>;

    /// Run one statement in autocommit mode.
    #[tracing::instrument(skip(self))]
    async fn execute(&self, statement: D::Statement) -> Result<D::Outcome, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .execute(statement)
            .await
            .map_err(Self::Error::from)
    }

    /// Run one read-only query.
    #[tracing::instrument(skip(self))]
    async fn query(&self, query: D::Query) -> Result<D::QueryResult, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().query(query).await.map_err(Self::Error::from)
    }
}
