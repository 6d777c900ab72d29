//! # Customer Client

use super::unexpected;
use crate::error::FoodError;
use crate::model::{Customer, CustomerId};
use crate::store::{FoodDb, Query, QueryResult, Statement};
use async_trait::async_trait;
use tracing::{debug, instrument};
use txn_actor::{DatabaseClient, StoreClient};

/// Client for the customers table.
#[derive(Clone)]
pub struct CustomerClient {
    inner: DatabaseClient<FoodDb>,
}

impl CustomerClient {
    pub fn new(inner: DatabaseClient<FoodDb>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn register_customer(&self, customer: Customer) -> Result<CustomerId, FoodError> {
        debug!("Sending request");
        let id = customer.id;
        self.execute(Statement::InsertCustomer(customer)).await?;
        Ok(id)
    }

    pub async fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>, FoodError> {
        match self.query(Query::Customer(id)).await? {
            QueryResult::Customer(customer) => Ok(customer),
            other => Err(unexpected(other)),
        }
    }
}

#[async_trait]
impl StoreClient<FoodDb> for CustomerClient {
    type Error = FoodError;

    fn inner(&self) -> &DatabaseClient<FoodDb> {
        &self.inner
    }
}
