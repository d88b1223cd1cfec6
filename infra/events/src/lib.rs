//! # Event Bus
//!
//! A type-safe, asynchronous broadcast bus connecting decoupled feature
//! slices (e.g. catalog mutations fanning out to the audit trail).
//!
//! ## Features
//!
//! * **Type-Safe**: events are identified by their Rust type.
//! * **Fan-out**: every subscriber of an event type sees every published event.
//! * **Low overhead**: `FxHashMap` + `parking_lot::RwLock` around lazily
//!   created `tokio::sync::broadcast` channels.
//!
//! # Example
//!
//! ```rust
//! use machex_event_bus::{EventBus, EventBusError, EventReceiverExt};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct ItemCreated { id: u64 }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!
//!     let mut rx = bus.subscribe::<ItemCreated>()?;
//!     bus.publish(ItemCreated { id: 42 })?;
//!
//!     if let Some(event) = rx.recv_event().await {
//!         assert_eq!(event.id, 42);
//!     }
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;
