//! # Order Client
//!
//! Provides a high-level API over the orders table. The delivery rules run
//! inside the store when these statements execute; nothing here re-checks them.

use super::unexpected;
use crate::error::FoodError;
use crate::model::{Order, OrderCreate, OrderId, OrderUpdate, STATUS_COMPLETED};
use crate::store::{FoodDb, Query, QueryResult, Statement};
use async_trait::async_trait;
use tracing::{debug, instrument};
use txn_actor::{DatabaseClient, StoreClient};

/// Client for the orders table.
#[derive(Clone)]
pub struct OrderClient {
    inner: DatabaseClient<FoodDb>,
}

impl OrderClient {
    pub fn new(inner: DatabaseClient<FoodDb>) -> Self {
        Self { inner }
    }

    /// Places an order. Fails with `ConstraintViolation` if the delivery agent
    /// already has one; on success the customer's address is updated.
    #[instrument(skip(self))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<OrderId, FoodError> {
        debug!(?params, "Placing order");
        let id = params.id;
        self.execute(Statement::InsertOrder(params)).await?;
        Ok(id)
    }

    /// Returns rows affected: 0 if the order does not exist.
    #[instrument(skip(self))]
    pub async fn update_order(&self, id: OrderId, update: OrderUpdate) -> Result<usize, FoodError> {
        debug!("Sending request");
        self.execute(Statement::UpdateOrder { id, update }).await
    }

    pub async fn set_status(&self, id: OrderId, status: &str) -> Result<usize, FoodError> {
        self.update_order(id, OrderUpdate::status(status)).await
    }

    /// Marks the order completed, which completes its payment too.
    pub async fn complete_order(&self, id: OrderId) -> Result<usize, FoodError> {
        self.set_status(id, STATUS_COMPLETED).await
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: OrderId) -> Result<usize, FoodError> {
        debug!("Sending request");
        self.execute(Statement::DeleteOrder(id)).await
    }

    pub async fn get_order(&self, id: OrderId) -> Result<Option<Order>, FoodError> {
        match self.query(Query::Order(id)).await? {
            QueryResult::Order(order) => Ok(order),
            other => Err(unexpected(other)),
        }
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, FoodError> {
        match self.query(Query::Orders).await? {
            QueryResult::Orders(orders) => Ok(orders),
            other => Err(unexpected(other)),
        }
    }
}

#[async_trait]
impl StoreClient<FoodDb> for OrderClient {
    type Error = FoodError;

    fn inner(&self) -> &DatabaseClient<FoodDb> {
        &self.inner
    }
}
