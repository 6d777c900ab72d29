//! # Views
//!
//! Saved read projections over the tables. A view stores only its definition;
//! rows are derived from the tables every time it is selected, so dropping and
//! recreating a view never loses data.
//!
//! | View definition | Joins | Columns |
//! |-----------------|-------|---------|
//! | [`ViewDefinition::CustomerOrders`] | customers ⋈ orders | customer id, name, order id, total |
//! | [`ViewDefinition::PaymentOrderCustomerDetails`] | payments ⋈ orders ⋈ customers | payment id, order id, customer id, name, age, address, amount, mode, status |

use crate::error::FoodError;
use crate::model::{CustomerId, OrderId, PaymentId};
use crate::store::Tables;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name the demo and seed data use for the customer/order view.
pub const CUSTOMER_ORDERS: &str = "CustomerOrders";

/// Name the demo and seed data use for the payment details view.
pub const PAYMENT_ORDER_CUSTOMER_DETAILS: &str = "PaymentOrderCustomerDetails";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewDefinition {
    CustomerOrders,
    PaymentOrderCustomerDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerOrderRow {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub order_id: OrderId,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetailRow {
    pub payment_id: PaymentId,
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub age: u32,
    pub address: Option<String>,
    pub amount: f64,
    pub mode: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewRows {
    CustomerOrders(Vec<CustomerOrderRow>),
    PaymentDetails(Vec<PaymentDetailRow>),
}

impl ViewRows {
    pub fn len(&self) -> usize {
        match self {
            ViewRows::CustomerOrders(rows) => rows.len(),
            ViewRows::PaymentDetails(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ViewDefinition {
    /// Derives the view's rows from the current table contents (inner joins).
    pub fn evaluate(&self, tables: &Tables) -> ViewRows {
        match self {
            ViewDefinition::CustomerOrders => ViewRows::CustomerOrders(
                tables
                    .orders()
                    .filter_map(|o| {
                        let c = tables.customer(o.customer_id)?;
                        Some(CustomerOrderRow {
                            customer_id: c.id,
                            customer_name: c.name.clone(),
                            order_id: o.id,
                            total: o.total,
                        })
                    })
                    .collect(),
            ),
            ViewDefinition::PaymentOrderCustomerDetails => ViewRows::PaymentDetails(
                tables
                    .payments()
                    .filter_map(|p| {
                        let o = tables.order(p.order_id)?;
                        let c = tables.customer(o.customer_id)?;
                        Some(PaymentDetailRow {
                            payment_id: p.id,
                            order_id: p.order_id,
                            customer_id: c.id,
                            customer_name: c.name.clone(),
                            age: c.age,
                            address: c.address.clone(),
                            amount: p.amount,
                            mode: p.mode.clone(),
                            status: p.status.clone(),
                        })
                    })
                    .collect(),
            ),
        }
    }
}

/// Named view definitions.
#[derive(Debug, Clone, Default)]
pub struct ViewCatalog {
    views: BTreeMap<String, ViewDefinition>,
}

impl ViewCatalog {
    pub fn get(&self, name: &str) -> Option<ViewDefinition> {
        self.views.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }

    /// `CREATE VIEW`: fails if the name is taken. Returns the previous definition (always `None`).
    pub fn create(
        &mut self,
        name: &str,
        definition: ViewDefinition,
    ) -> Result<Option<ViewDefinition>, FoodError> {
        if self.views.contains_key(name) {
            return Err(FoodError::ViewAlreadyExists(name.to_string()));
        }
        Ok(self.views.insert(name.to_string(), definition))
    }

    /// `CREATE OR REPLACE VIEW`. Returns the replaced definition, if any.
    pub fn create_or_replace(
        &mut self,
        name: &str,
        definition: ViewDefinition,
    ) -> Option<ViewDefinition> {
        self.views.insert(name.to_string(), definition)
    }

    /// `DROP VIEW [IF EXISTS]`. Returns the dropped definition; `None` only when
    /// `if_exists` is set and the view is missing.
    pub fn drop_view(
        &mut self,
        name: &str,
        if_exists: bool,
    ) -> Result<Option<ViewDefinition>, FoodError> {
        match self.views.remove(name) {
            Some(definition) => Ok(Some(definition)),
            None if if_exists => Ok(None),
            None => Err(FoodError::ViewNotFound(name.to_string())),
        }
    }

    /// Puts a view back to its previous definition, or removes it if it had none.
    pub(crate) fn restore(&mut self, name: String, previous: Option<ViewDefinition>) {
        match previous {
            Some(definition) => {
                self.views.insert(name, definition);
            }
            None => {
                self.views.remove(&name);
            }
        }
    }

    pub fn select(&self, name: &str, tables: &Tables) -> Result<ViewRows, FoodError> {
        self.get(name)
            .map(|definition| definition.evaluate(tables))
            .ok_or_else(|| FoodError::ViewNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rejects_existing_name() {
        let mut catalog = ViewCatalog::default();
        catalog
            .create(CUSTOMER_ORDERS, ViewDefinition::CustomerOrders)
            .unwrap();
        assert_eq!(
            catalog.create(CUSTOMER_ORDERS, ViewDefinition::CustomerOrders),
            Err(FoodError::ViewAlreadyExists(CUSTOMER_ORDERS.into()))
        );
    }

    #[test]
    fn test_create_or_replace_and_drop_if_exists() {
        let mut catalog = ViewCatalog::default();
        assert_eq!(
            catalog.create_or_replace("v", ViewDefinition::CustomerOrders),
            None
        );
        assert_eq!(
            catalog.create_or_replace("v", ViewDefinition::PaymentOrderCustomerDetails),
            Some(ViewDefinition::CustomerOrders)
        );
        assert_eq!(
            catalog.drop_view("v", true),
            Ok(Some(ViewDefinition::PaymentOrderCustomerDetails))
        );
        assert_eq!(catalog.drop_view("v", true), Ok(None));
        assert_eq!(
            catalog.drop_view("v", false),
            Err(FoodError::ViewNotFound("v".into()))
        );
    }

    #[test]
    fn test_select_missing_view() {
        let catalog = ViewCatalog::default();
        assert!(matches!(
            catalog.select("nope", &Tables::default()),
            Err(FoodError::ViewNotFound(_))
        ));
    }
}
