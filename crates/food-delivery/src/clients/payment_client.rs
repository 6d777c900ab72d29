//! # Payment Client

use super::unexpected;
use crate::error::FoodError;
use crate::model::{OrderId, Payment, PaymentId, PaymentUpdate};
use crate::store::{FoodDb, Query, QueryResult, Statement};
use async_trait::async_trait;
use tracing::{debug, instrument};
use txn_actor::{DatabaseClient, StoreClient};

/// Client for the payment table.
#[derive(Clone)]
pub struct PaymentClient {
    inner: DatabaseClient<FoodDb>,
}

impl PaymentClient {
    pub fn new(inner: DatabaseClient<FoodDb>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn record_payment(&self, payment: Payment) -> Result<PaymentId, FoodError> {
        debug!("Sending request");
        let id = payment.id;
        self.execute(Statement::InsertPayment(payment)).await?;
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn update_payment(
        &self,
        id: PaymentId,
        update: PaymentUpdate,
    ) -> Result<usize, FoodError> {
        debug!("Sending request");
        self.execute(Statement::UpdatePayment { id, update }).await
    }

    pub async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, FoodError> {
        match self.query(Query::Payment(id)).await? {
            QueryResult::Payment(payment) => Ok(payment),
            other => Err(unexpected(other)),
        }
    }

    pub async fn payment_for_order(&self, order: OrderId) -> Result<Option<Payment>, FoodError> {
        match self.query(Query::PaymentForOrder(order)).await? {
            QueryResult::Payment(payment) => Ok(payment),
            other => Err(unexpected(other)),
        }
    }
}

#[async_trait]
impl StoreClient<FoodDb> for PaymentClient {
    type Error = FoodError;

    fn inner(&self) -> &DatabaseClient<FoodDb> {
        &self.inner
    }
}
