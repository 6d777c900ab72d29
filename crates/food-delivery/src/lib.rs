//! # Food Delivery Store
//!
//! An in-memory orders database with three order triggers, savepoint-capable
//! transactions, and saved views, served by a [`txn_actor::DatabaseActor`].
//!
//! ## Order Triggers
//!
//! | Trigger | Fires | Effect |
//! |---------|-------|--------|
//! | `update_payment_status_after_order` | after an order update | status `completed` completes the order's payment |
//! | `check_delivery_agent_availability_before_order` | before an order insert | rejects the order if the agent already has one |
//! | `update_customer_address_after_order` | after an order insert | copies the order's address onto the customer |
//!
//! A trigger's follow-on write runs in the same unit of work as the statement
//! that fired it. If it fails, the whole transaction is rolled back.
//!
//! ## Layout
//!
//! - **[model]**: rows and their ids
//! - **[store]**: [`FoodDb`], the statements it executes, and the tables
//! - **[triggers]**: the [`OrderTrigger`](triggers::OrderTrigger) hook and the three rules
//! - **[views]**: `CustomerOrders` and `PaymentOrderCustomerDetails`
//! - **[clients]**: typed wrappers, one per table
//! - **[lifecycle]**: [`DeliverySystem`](lifecycle::DeliverySystem) and [`Settings`](lifecycle::Settings)
//! - **[seed]**: fixture rows
//!
//! ## Testing
//!
//! See [`txn_actor::mock`] for testing clients without spawning the actor.

pub mod clients;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod seed;
pub mod store;
pub mod triggers;
pub mod views;

pub use error::FoodError;
pub use store::FoodDb;
