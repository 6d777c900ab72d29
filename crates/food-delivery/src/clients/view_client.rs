//! # View Client
//!
//! View DDL and selects. Definitions are stored by name; rows are derived from
//! the tables on every select.

use super::unexpected;
use crate::error::FoodError;
use crate::store::{FoodDb, Query, QueryResult, Statement};
use crate::views::{CustomerOrderRow, PaymentDetailRow, ViewDefinition, ViewRows};
use async_trait::async_trait;
use tracing::{debug, instrument};
use txn_actor::{DatabaseClient, StoreClient};

/// Client for saved views.
#[derive(Clone)]
pub struct ViewClient {
    inner: DatabaseClient<FoodDb>,
}

impl ViewClient {
    pub fn new(inner: DatabaseClient<FoodDb>) -> Self {
        Self { inner }
    }

    /// `CREATE VIEW`. Fails with `ViewAlreadyExists` if the name is taken.
    #[instrument(skip(self))]
    pub async fn create_view(&self, name: &str, definition: ViewDefinition) -> Result<(), FoodError> {
        debug!("Sending request");
        self.execute(Statement::CreateView {
            name: name.to_string(),
            definition,
        })
        .await?;
        Ok(())
    }

    /// `CREATE OR REPLACE VIEW`.
    #[instrument(skip(self))]
    pub async fn create_or_replace_view(
        &self,
        name: &str,
        definition: ViewDefinition,
    ) -> Result<(), FoodError> {
        debug!("Sending request");
        self.execute(Statement::CreateOrReplaceView {
            name: name.to_string(),
            definition,
        })
        .await?;
        Ok(())
    }

    /// `DROP VIEW`. Fails with `ViewNotFound` if the view does not exist.
    #[instrument(skip(self))]
    pub async fn drop_view(&self, name: &str) -> Result<(), FoodError> {
        self.drop_by_name(name, false).await
    }

    /// `DROP VIEW IF EXISTS`.
    #[instrument(skip(self))]
    pub async fn drop_view_if_exists(&self, name: &str) -> Result<(), FoodError> {
        self.drop_by_name(name, true).await
    }

    async fn drop_by_name(&self, name: &str, if_exists: bool) -> Result<(), FoodError> {
        self.execute(Statement::DropView {
            name: name.to_string(),
            if_exists,
        })
        .await?;
        Ok(())
    }

    pub async fn select(&self, name: &str) -> Result<ViewRows, FoodError> {
        match self.query(Query::View(name.to_string())).await? {
            QueryResult::View(rows) => Ok(rows),
            other => Err(unexpected(other)),
        }
    }

    /// Selects a view that must be a customer/order projection.
    pub async fn customer_orders(&self, name: &str) -> Result<Vec<CustomerOrderRow>, FoodError> {
        match self.select(name).await? {
            ViewRows::CustomerOrders(rows) => Ok(rows),
            other => Err(FoodError::UnexpectedResult(format!("{other:?}"))),
        }
    }

    /// Selects a view that must be a payment details projection.
    pub async fn payment_details(&self, name: &str) -> Result<Vec<PaymentDetailRow>, FoodError> {
        match self.select(name).await? {
            ViewRows::PaymentDetails(rows) => Ok(rows),
            other => Err(FoodError::UnexpectedResult(format!("{other:?}"))),
        }
    }
}

#[async_trait]
impl StoreClient<FoodDb> for ViewClient {
    type Error = FoodError;

    fn inner(&self) -> &DatabaseClient<FoodDb> {
        &self.inner
    }
}
