//! Type-safe wrappers around [`DatabaseClient<FoodDb>`](txn_actor::DatabaseClient).
//!
//! Each client runs its statements in autocommit mode and maps transaction
//! errors back to [`FoodError`](crate::error::FoodError). For multi-statement
//! units of work, open a [`Session`](txn_actor::Session) instead.

pub mod customer_client;
pub mod delivery_agent_client;
pub mod order_client;
pub mod payment_client;
pub mod view_client;

pub use customer_client::*;
pub use delivery_agent_client::*;
pub use order_client::*;
pub use payment_client::*;
pub use view_client::*;

use crate::error::FoodError;
use crate::store::QueryResult;

pub(crate) fn unexpected(result: QueryResult) -> FoodError {
    FoodError::UnexpectedResult(format!("{result:?}"))
}
