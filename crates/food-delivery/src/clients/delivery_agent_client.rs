//! # Delivery Agent Client

use super::unexpected;
use crate::error::FoodError;
use crate::model::{DeliveryAgent, DeliveryAgentId, Order};
use crate::store::{FoodDb, Query, QueryResult, Statement};
use async_trait::async_trait;
use tracing::{debug, instrument};
use txn_actor::{DatabaseClient, StoreClient};

/// Client for the delivery agents table.
#[derive(Clone)]
pub struct DeliveryAgentClient {
    inner: DatabaseClient<FoodDb>,
}

impl DeliveryAgentClient {
    pub fn new(inner: DatabaseClient<FoodDb>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn register_agent(&self, agent: DeliveryAgent) -> Result<DeliveryAgentId, FoodError> {
        debug!("Sending request");
        let id = agent.id;
        self.execute(Statement::InsertDeliveryAgent(agent)).await?;
        Ok(id)
    }

    pub async fn get_agent(&self, id: DeliveryAgentId) -> Result<Option<DeliveryAgent>, FoodError> {
        match self.query(Query::DeliveryAgent(id)).await? {
            QueryResult::DeliveryAgent(agent) => Ok(agent),
            other => Err(unexpected(other)),
        }
    }

    /// Orders currently assigned to the agent.
    pub async fn assigned_orders(&self, id: DeliveryAgentId) -> Result<Vec<Order>, FoodError> {
        match self.query(Query::OrdersForAgent(id)).await? {
            QueryResult::Orders(orders) => Ok(orders),
            other => Err(unexpected(other)),
        }
    }

    /// Whether a new order naming this agent would pass the availability rule.
    pub async fn is_available(&self, id: DeliveryAgentId) -> Result<bool, FoodError> {
        Ok(self.assigned_orders(id).await?.is_empty())
    }
}

#[async_trait]
impl StoreClient<FoodDb> for DeliveryAgentClient {
    type Error = FoodError;

    fn inner(&self) -> &DatabaseClient<FoodDb> {
        &self.inner
    }
}
