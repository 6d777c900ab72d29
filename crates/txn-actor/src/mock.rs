//! # Mock Client & Testing Guide
//!
//! `MockClient<D>` hands out a real [`DatabaseClient<D>`] whose requests are answered
//! from a queue of expectations instead of by a running actor. Use it to test logic
//! that sits *around* the client (result unpacking, error mapping) without building
//! any database state.
//!
//! ## When to use Mocks vs a Real Actor
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None (canned answers) | Real tables, triggers, undo log |
//! | **Error Injection** | Easy (`return_err`) | Requires building the failing state |
//! | **Use Case** | Client wrappers | Rules, transactions, end-to-end flows |
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut mock = MockClient::<FoodDb>::new();
//! mock.expect_query().return_ok(QueryResult::Order(None));
//! mock.expect_execute().return_err(TxError::ActorClosed);
//!
//! let orders = OrderClient::new(mock.client());
//! assert!(orders.get_order(OrderId(1)).await.unwrap().is_none());
//! assert!(orders.delete_order(OrderId(1)).await.is_err());
//! mock.verify();
//! ```
//!
//! Transaction-control requests (`session()`, `begin()`, ...) are not mockable;
//! test those against a real actor.

use crate::client::DatabaseClient;
use crate::database::Database;
use crate::error::TxError;
use crate::message::Request;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

enum Expectation<D: Database> {
    Execute {
        response: Result<D::Outcome, TxError>,
    },
    Query {
        response: Result<D::QueryResult, TxError>,
    },
}

type Expectations<D> = Arc<Mutex<VecDeque<Expectation<D>>>>;

/// A `DatabaseClient` backed by canned answers instead of a running actor.
pub struct MockClient<D: Database> {
    client: DatabaseClient<D>,
    expectations: Expectations<D>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<D: Database> Default for MockClient<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Database> MockClient<D> {
    /// Starts the answering task with an empty expectation queue.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<Request<D>>(100);
        let expectations: Expectations<D> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        Request::Execute { respond_to, .. },
                        Some(Expectation::Execute { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (Request::Query { respond_to, .. }, Some(Expectation::Query { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {:?}", request.session());
                    }
                }
            }
        });

        Self {
            client: DatabaseClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// A client wired to this mock; hand it to the wrapper under test.
    pub fn client(&self) -> DatabaseClient<D> {
        self.client.clone()
    }

    /// Expects an `execute` call.
    pub fn expect_execute(&mut self) -> ExecuteExpectationBuilder<D> {
        ExecuteExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `query` call.
    pub fn expect_query(&mut self) -> QueryExpectationBuilder<D> {
        QueryExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Panics if any queued answer was never consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("{} queued answer(s) never requested", exps.len());
        }
    }
}

/// Builder for `execute` expectations.
pub struct ExecuteExpectationBuilder<D: Database> {
    expectations: Expectations<D>,
}

impl<D: Database> ExecuteExpectationBuilder<D> {
    pub fn return_ok(self, outcome: D::Outcome) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Execute {
                response: Ok(outcome),
            });
    }

    pub fn return_err(self, error: TxError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Execute {
                response: Err(error),
            });
    }
}

/// Builder for `query` expectations.
pub struct QueryExpectationBuilder<D: Database> {
    expectations: Expectations<D>,
}

impl<D: Database> QueryExpectationBuilder<D> {
    pub fn return_ok(self, result: D::QueryResult) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Query {
                response: Ok(result),
            });
    }

    pub fn return_err(self, error: TxError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Query {
                response: Err(error),
            });
    }
}
