//! Change notifications between the record store and whatever renders it.
//!
//! The bus is constructed by the application and handed to the pieces that
//! publish or listen; there is no process-wide instance.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription, SubscriptionId, Topic};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
