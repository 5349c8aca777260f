//! # Event Bus
//!
//! A thread-safe, channel-addressed event bus for in-process pub-sub
//! messaging between decoupled components.
//!
//! ## Overview
//!
//! Provides a centralized [`EventBus`] where subscribers register typed
//! callbacks under string channel names and publishers broadcast values to
//! every handler currently registered on that channel. Dispatch is
//! synchronous and runs on the publishing thread.
//!
//! ## Features
//!
//! * **Type-Safe**: Handlers are bound to a concrete event type at
//!   registration; mismatched publishes are reported, never undefined.
//! * **Scoped registrations**: a [`Subscription`] removes its handler when
//!   dropped, or earlier via [`Subscription::unsubscribe`].
//! * **Fan-out isolation**: a panicking handler never stops delivery to the
//!   remaining handlers of the same publish.
//! * **High Performance**: `FxHashMap` + `parking_lot::RwLock`; handlers run
//!   outside the registry lock.
//!
//! # Example
//!
//! ```rust
//! use herald_event_bus::{EventBus, EventBusError};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! #[derive(Debug)]
//! struct UserCreated { id: u64 }
//!
//! fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!
//!     let seen = Arc::new(AtomicUsize::new(0));
//!     let counter = Arc::clone(&seen);
//!     let subscription = bus.subscribe("users", move |event: &UserCreated| {
//!         assert_eq!(event.id, 42);
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     });
//!
//!     bus.publish("users", UserCreated { id: 42 })?;
//!     assert_eq!(seen.load(Ordering::SeqCst), 1);
//!
//!     drop(subscription);
//!     assert_eq!(bus.publish("users", UserCreated { id: 42 })?, 0);
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod subscription;

pub use bus::{Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use subscription::Subscription;
