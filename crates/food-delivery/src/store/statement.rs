//! Statements, queries, and undo records understood by [`FoodDb`](super::FoodDb).

use crate::model::{
    Customer, CustomerId, DeliveryAgent, DeliveryAgentId, Order, OrderCreate, OrderId,
    OrderUpdate, Payment, PaymentId, PaymentUpdate,
};
use crate::views::{ViewDefinition, ViewRows};

/// A write. Executing one reports the number of rows it affected.
#[derive(Debug, Clone)]
pub enum Statement {
    InsertCustomer(Customer),
    InsertDeliveryAgent(DeliveryAgent),
    InsertOrder(OrderCreate),
    UpdateOrder { id: OrderId, update: OrderUpdate },
    DeleteOrder(OrderId),
    InsertPayment(Payment),
    UpdatePayment { id: PaymentId, update: PaymentUpdate },
    CreateView { name: String, definition: ViewDefinition },
    CreateOrReplaceView { name: String, definition: ViewDefinition },
    DropView { name: String, if_exists: bool },
}

impl Statement {
    /// `UPDATE orders SET status = ... WHERE order_id = ...`
    pub fn set_order_status(id: u32, status: impl Into<String>) -> Self {
        Statement::UpdateOrder {
            id: OrderId(id),
            update: OrderUpdate::status(status),
        }
    }
}

/// A read.
#[derive(Debug, Clone)]
pub enum Query {
    Customer(CustomerId),
    DeliveryAgent(DeliveryAgentId),
    Order(OrderId),
    Orders,
    OrdersForAgent(DeliveryAgentId),
    Payment(PaymentId),
    PaymentForOrder(OrderId),
    View(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Customer(Option<Customer>),
    DeliveryAgent(Option<DeliveryAgent>),
    Order(Option<Order>),
    Orders(Vec<Order>),
    Payment(Option<Payment>),
    View(ViewRows),
}

/// Undo record: the prior value of one row or view, `None` if it did not exist.
#[derive(Debug, Clone)]
pub enum Change {
    Customer {
        id: CustomerId,
        previous: Option<Customer>,
    },
    DeliveryAgent {
        id: DeliveryAgentId,
        previous: Option<DeliveryAgent>,
    },
    Order {
        id: OrderId,
        previous: Option<Order>,
    },
    Payment {
        id: PaymentId,
        previous: Option<Payment>,
    },
    View {
        name: String,
        previous: Option<ViewDefinition>,
    },
}
