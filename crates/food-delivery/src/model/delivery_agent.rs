use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Delivery Agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeliveryAgentId(pub u32);

impl From<u32> for DeliveryAgentId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for DeliveryAgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "agent_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryAgent {
    pub id: DeliveryAgentId,
    pub name: String,
}

impl DeliveryAgent {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: DeliveryAgentId(id),
            name: name.into(),
        }
    }
}
