//! # Food-Delivery Store
//!
//! [`FoodDb`] is the [`Database`] the transaction actor owns: four tables, the
//! view catalog, and the order triggers that run around every order write.
//!
//! ## Order Write Path
//!
//! ```text
//! INSERT order:  before_insert triggers → key + reference checks → write → after_insert triggers
//! UPDATE order:  write → after_update triggers
//! ```
//!
//! Every write goes through a [`TableWriter`], so the actor can revert a failed
//! statement, a transaction, or everything after a savepoint, including the
//! rows a trigger touched.

pub mod statement;
pub mod tables;

pub use statement::*;
pub use tables::*;

use crate::error::FoodError;
use crate::model::{Order, OrderCreate, OrderId, OrderUpdate};
use crate::triggers::TriggerSet;
use crate::views::ViewCatalog;
use tracing::debug;
use txn_actor::Database;

/// The in-memory food-delivery database.
#[derive(Debug, Clone)]
pub struct FoodDb {
    tables: Tables,
    views: ViewCatalog,
    triggers: TriggerSet,
    enforce_references: bool,
}

impl Default for FoodDb {
    fn default() -> Self {
        Self::new(TriggerSet::standard())
    }
}

impl FoodDb {
    pub fn new(triggers: TriggerSet) -> Self {
        Self {
            tables: Tables::default(),
            views: ViewCatalog::default(),
            triggers,
            enforce_references: true,
        }
    }

    /// When disabled, rows may reference customers, agents, or orders that do not exist.
    pub fn enforce_references(mut self, enforce: bool) -> Self {
        self.enforce_references = enforce;
        self
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn views(&self) -> &ViewCatalog {
        &self.views
    }

    fn insert_order(
        &mut self,
        params: OrderCreate,
        changes: &mut Vec<Change>,
    ) -> Result<usize, FoodError> {
        let order = Order::from(params);
        self.triggers.before_insert(&order, &self.tables)?;

        if self.tables.order(order.id).is_some() {
            return Err(FoodError::DuplicateKey {
                table: "orders",
                key: order.id.to_string(),
            });
        }
        if self.enforce_references {
            if self.tables.customer(order.customer_id).is_none() {
                return Err(FoodError::ForeignKeyViolation {
                    table: "orders",
                    column: "customer_id",
                    key: order.customer_id.to_string(),
                });
            }
            if self.tables.delivery_agent(order.delivery_agent_id).is_none() {
                return Err(FoodError::ForeignKeyViolation {
                    table: "orders",
                    column: "da_id",
                    key: order.delivery_agent_id.to_string(),
                });
            }
        }

        let mut writer = TableWriter::new(&mut self.tables, changes);
        writer.put_order(order.clone());
        self.triggers.after_insert(&order, &mut writer)?;
        Ok(1)
    }

    fn update_order(
        &mut self,
        id: OrderId,
        update: OrderUpdate,
        changes: &mut Vec<Change>,
    ) -> Result<usize, FoodError> {
        let Some(old) = self.tables.order(id).cloned() else {
            return Ok(0);
        };
        let mut new = old.clone();
        new.apply(update);

        let mut writer = TableWriter::new(&mut self.tables, changes);
        writer.put_order(new.clone());
        self.triggers.after_update(&old, &new, &mut writer)?;
        Ok(1)
    }

    fn delete_order(&mut self, id: OrderId, changes: &mut Vec<Change>) -> Result<usize, FoodError> {
        if self.enforce_references && self.tables.payment_for_order(id).is_some() {
            return Err(FoodError::ForeignKeyViolation {
                table: "payment",
                column: "order_id",
                key: id.to_string(),
            });
        }
        let mut writer = TableWriter::new(&mut self.tables, changes);
        Ok(writer.remove_order(id).map_or(0, |_| 1))
    }
}

impl Database for FoodDb {
    type Statement = Statement;
    type Outcome = usize;
    type Query = Query;
    type QueryResult = QueryResult;
    type Change = Change;
    type Error = FoodError;

    fn execute(
        &mut self,
        statement: Statement,
        changes: &mut Vec<Change>,
    ) -> Result<usize, FoodError> {
        match statement {
            Statement::InsertCustomer(customer) => {
                if self.tables.customer(customer.id).is_some() {
                    return Err(FoodError::DuplicateKey {
                        table: "customers",
                        key: customer.id.to_string(),
                    });
                }
                TableWriter::new(&mut self.tables, changes).put_customer(customer);
                Ok(1)
            }
            Statement::InsertDeliveryAgent(agent) => {
                if self.tables.delivery_agent(agent.id).is_some() {
                    return Err(FoodError::DuplicateKey {
                        table: "delivery_agents",
                        key: agent.id.to_string(),
                    });
                }
                TableWriter::new(&mut self.tables, changes).put_delivery_agent(agent);
                Ok(1)
            }
            Statement::InsertOrder(params) => self.insert_order(params, changes),
            Statement::UpdateOrder { id, update } => self.update_order(id, update, changes),
            Statement::DeleteOrder(id) => self.delete_order(id, changes),
            Statement::InsertPayment(payment) => {
                if self.tables.payment(payment.id).is_some() {
                    return Err(FoodError::DuplicateKey {
                        table: "payment",
                        key: payment.id.to_string(),
                    });
                }
                if self.enforce_references && self.tables.order(payment.order_id).is_none() {
                    return Err(FoodError::ForeignKeyViolation {
                        table: "payment",
                        column: "order_id",
                        key: payment.order_id.to_string(),
                    });
                }
                TableWriter::new(&mut self.tables, changes).put_payment(payment);
                Ok(1)
            }
            Statement::UpdatePayment { id, update } => {
                let Some(mut payment) = self.tables.payment(id).cloned() else {
                    return Ok(0);
                };
                payment.apply(update);
                TableWriter::new(&mut self.tables, changes).put_payment(payment);
                Ok(1)
            }
            Statement::CreateView { name, definition } => {
                let previous = self.views.create(&name, definition)?;
                changes.push(Change::View { name, previous });
                Ok(0)
            }
            Statement::CreateOrReplaceView { name, definition } => {
                let previous = self.views.create_or_replace(&name, definition);
                changes.push(Change::View { name, previous });
                Ok(0)
            }
            Statement::DropView { name, if_exists } => {
                if let Some(definition) = self.views.drop_view(&name, if_exists)? {
                    changes.push(Change::View {
                        name,
                        previous: Some(definition),
                    });
                }
                Ok(0)
            }
        }
    }

    fn revert(&mut self, change: Change) {
        debug!(?change, "Revert");
        match change {
            Change::View { name, previous } => self.views.restore(name, previous),
            row => self.tables.revert(row),
        }
    }

    fn query(&self, query: Query) -> Result<QueryResult, FoodError> {
        let tables = &self.tables;
        Ok(match query {
            Query::Customer(id) => QueryResult::Customer(tables.customer(id).cloned()),
            Query::DeliveryAgent(id) => {
                QueryResult::DeliveryAgent(tables.delivery_agent(id).cloned())
            }
            Query::Order(id) => QueryResult::Order(tables.order(id).cloned()),
            Query::Orders => QueryResult::Orders(tables.orders().cloned().collect()),
            Query::OrdersForAgent(agent) => {
                QueryResult::Orders(tables.orders_for_agent(agent).cloned().collect())
            }
            Query::Payment(id) => QueryResult::Payment(tables.payment(id).cloned()),
            Query::PaymentForOrder(id) => {
                QueryResult::Payment(tables.payment_for_order(id).cloned())
            }
            Query::View(name) => QueryResult::View(self.views.select(&name, tables)?),
        })
    }

    /// A failed follow-on write discards the whole unit of work, not just the statement.
    fn aborts_transaction(error: &FoodError) -> bool {
        matches!(error, FoodError::TriggerFailed { .. })
    }
}
