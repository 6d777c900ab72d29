use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(pub u32);

impl From<u32> for CustomerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "customer_{}", self.0)
    }
}

/// A registered customer.
///
/// `address` is overwritten with the delivery address of every order the
/// customer places, so it always holds the most recent one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub address: Option<String>,
}

impl Customer {
    pub fn new(id: u32, name: impl Into<String>, age: u32) -> Self {
        Self {
            id: CustomerId(id),
            name: name.into(),
            age,
            address: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}
