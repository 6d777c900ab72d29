//! Row types for the four tables, plus their insert and update payloads.

pub mod customer;
pub mod delivery_agent;
pub mod order;
pub mod payment;

pub use customer::*;
pub use delivery_agent::*;
pub use order::*;
pub use payment::*;
