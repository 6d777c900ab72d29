//! Initial rows loaded from a JSON fixture.
//!
//! The bundled fixture holds customers 101-108, agents 1-5, and one open order
//! (1001, agent 4) with a pending payment. Agents 1, 2, 3, and 5 start free.

use crate::error::FoodError;
use crate::model::{Customer, DeliveryAgent, OrderCreate, Payment};
use crate::store::{FoodDb, Statement};
use serde::Deserialize;
use tracing::info;
use txn_actor::DatabaseClient;

const STANDARD_FIXTURE: &str = include_str!("../fixtures/seed.json");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub delivery_agents: Vec<DeliveryAgent>,
    #[serde(default)]
    pub orders: Vec<OrderCreate>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Seed {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The fixture bundled with the crate.
    pub fn standard() -> Result<Self, serde_json::Error> {
        Self::from_json(STANDARD_FIXTURE)
    }

    /// Parents before children, so reference checks pass.
    pub fn statements(&self) -> Vec<Statement> {
        let customers = self.customers.iter().cloned().map(Statement::InsertCustomer);
        let agents = self
            .delivery_agents
            .iter()
            .cloned()
            .map(Statement::InsertDeliveryAgent);
        let orders = self.orders.iter().cloned().map(Statement::InsertOrder);
        let payments = self.payments.iter().cloned().map(Statement::InsertPayment);
        customers.chain(agents).chain(orders).chain(payments).collect()
    }

    /// Loads every row in one transaction. Nothing is kept if any row fails.
    pub async fn apply(&self, store: &DatabaseClient<FoodDb>) -> Result<usize, FoodError> {
        let session = store.session().await?;
        session.begin().await?;

        let mut rows = 0;
        for statement in self.statements() {
            match session.execute(statement).await {
                Ok(affected) => rows += affected,
                Err(e) => {
                    session.rollback().await?;
                    return Err(e.into());
                }
            }
        }
        session.commit().await?;

        info!(rows, "Seed data loaded");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerId, DeliveryAgentId};

    #[test]
    fn test_standard_fixture_parses() {
        let seed = Seed::standard().unwrap();
        assert_eq!(seed.customers.len(), 8);
        assert_eq!(seed.delivery_agents.len(), 5);
        assert_eq!(seed.customers[0].id, CustomerId(101));
        assert_eq!(seed.customers[2].address, None);
        assert_eq!(seed.orders[0].delivery_agent_id, DeliveryAgentId(4));
    }

    #[test]
    fn test_statements_put_parents_first() {
        let seed = Seed::standard().unwrap();
        let statements = seed.statements();
        assert_eq!(statements.len(), 15);
        assert!(matches!(statements[0], Statement::InsertCustomer(_)));
        assert!(matches!(statements[8], Statement::InsertDeliveryAgent(_)));
        assert!(matches!(statements[13], Statement::InsertOrder(_)));
        assert!(matches!(statements[14], Statement::InsertPayment(_)));
    }
}
