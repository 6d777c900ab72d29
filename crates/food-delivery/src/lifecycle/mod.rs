//! # System Lifecycle
//!
//! Starting, wiring, and stopping the food-delivery store.
//!
//! A single [`DatabaseActor`](txn_actor::DatabaseActor) owns the [`FoodDb`](crate::store::FoodDb).
//! [`DeliverySystem`] spawns it, hands out one typed client per table plus the
//! view client, and opens [`Session`](txn_actor::Session)s for explicit units of
//! work.
//!
//! ## Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`
//! 3. **Open transactions are rolled back** - nothing half-done survives
//! 4. **Await completion** - the actor task is joined
//!
//! Sessions hold their own sender, so drop them before calling
//! [`DeliverySystem::shutdown`] or it will wait for them.
//!
//! ## Configuration
//!
//! [`Settings`] are layered with the `config` crate: built-in defaults, then
//! an optional `config/default` file, then `FOOD_DELIVERY__*` environment
//! variables.

pub mod delivery_system;
pub mod settings;

pub use delivery_system::*;
pub use settings::*;
