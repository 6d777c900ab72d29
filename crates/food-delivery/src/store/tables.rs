//! Row storage for the four tables, and the change-recording writer that every
//! mutation goes through.

use super::statement::Change;
use crate::model::{
    Customer, CustomerId, DeliveryAgent, DeliveryAgentId, Order, OrderId, Payment, PaymentId,
};
use std::collections::BTreeMap;

/// The table contents. Ordered maps keep scans (and therefore view rows) in key order.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    customers: BTreeMap<CustomerId, Customer>,
    delivery_agents: BTreeMap<DeliveryAgentId, DeliveryAgent>,
    orders: BTreeMap<OrderId, Order>,
    payments: BTreeMap<PaymentId, Payment>,
}

impl Tables {
    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(&id)
    }

    pub fn delivery_agent(&self, id: DeliveryAgentId) -> Option<&DeliveryAgent> {
        self.delivery_agents.get(&id)
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    pub fn payment(&self, id: PaymentId) -> Option<&Payment> {
        self.payments.get(&id)
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    pub fn payments(&self) -> impl Iterator<Item = &Payment> {
        self.payments.values()
    }

    pub fn orders_for_agent(&self, agent: DeliveryAgentId) -> impl Iterator<Item = &Order> {
        self.orders
            .values()
            .filter(move |o| o.delivery_agent_id == agent)
    }

    /// The first payment recorded against the order.
    pub fn payment_for_order(&self, order: OrderId) -> Option<&Payment> {
        self.payments.values().find(|p| p.order_id == order)
    }

    /// Puts a row back to the value captured in `change`. View changes are ignored.
    pub(crate) fn revert(&mut self, change: Change) {
        match change {
            Change::Customer { id, previous } => restore(&mut self.customers, id, previous),
            Change::DeliveryAgent { id, previous } => {
                restore(&mut self.delivery_agents, id, previous)
            }
            Change::Order { id, previous } => restore(&mut self.orders, id, previous),
            Change::Payment { id, previous } => restore(&mut self.payments, id, previous),
            Change::View { .. } => {}
        }
    }
}

fn restore<K: Ord, V>(table: &mut BTreeMap<K, V>, key: K, previous: Option<V>) {
    match previous {
        Some(row) => {
            table.insert(key, row);
        }
        None => {
            table.remove(&key);
        }
    }
}

/// Write access to [`Tables`] that records an undo [`Change`] for every row it touches.
///
/// Statements and trigger hooks never mutate `Tables` directly; going through the
/// writer is what lets a failed statement, a rollback, or a rollback to a savepoint
/// undo trigger side effects together with the write that caused them.
pub struct TableWriter<'a> {
    tables: &'a mut Tables,
    changes: &'a mut Vec<Change>,
}

impl<'a> TableWriter<'a> {
    pub(crate) fn new(tables: &'a mut Tables, changes: &'a mut Vec<Change>) -> Self {
        Self { tables, changes }
    }

    pub fn tables(&self) -> &Tables {
        self.tables
    }

    pub fn put_customer(&mut self, customer: Customer) {
        let id = customer.id;
        let previous = self.tables.customers.insert(id, customer);
        self.changes.push(Change::Customer { id, previous });
    }

    pub fn put_delivery_agent(&mut self, agent: DeliveryAgent) {
        let id = agent.id;
        let previous = self.tables.delivery_agents.insert(id, agent);
        self.changes.push(Change::DeliveryAgent { id, previous });
    }

    pub fn put_order(&mut self, order: Order) {
        let id = order.id;
        let previous = self.tables.orders.insert(id, order);
        self.changes.push(Change::Order { id, previous });
    }

    pub fn remove_order(&mut self, id: OrderId) -> Option<Order> {
        let previous = self.tables.orders.remove(&id)?;
        self.changes.push(Change::Order {
            id,
            previous: Some(previous.clone()),
        });
        Some(previous)
    }

    pub fn put_payment(&mut self, payment: Payment) {
        let id = payment.id;
        let previous = self.tables.payments.insert(id, payment);
        self.changes.push(Change::Payment { id, previous });
    }

    /// Applies `f` to the customer row, if present. Returns rows affected.
    pub fn update_customer(&mut self, id: CustomerId, f: impl FnOnce(&mut Customer)) -> usize {
        let Some(row) = self.tables.customers.get_mut(&id) else {
            return 0;
        };
        let previous = row.clone();
        f(row);
        self.changes.push(Change::Customer {
            id,
            previous: Some(previous),
        });
        1
    }

    /// Applies `f` to every payment for the order. Returns rows affected.
    pub fn update_payments_for_order(
        &mut self,
        order: OrderId,
        mut f: impl FnMut(&mut Payment),
    ) -> usize {
        let mut affected = 0;
        for row in self.tables.payments.values_mut() {
            if row.order_id != order {
                continue;
            }
            self.changes.push(Change::Payment {
                id: row.id,
                previous: Some(row.clone()),
            });
            f(row);
            affected += 1;
        }
        affected
    }
}
