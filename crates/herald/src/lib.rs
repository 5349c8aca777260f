//! Facade crate for Herald infrastructure.
//! Re-exports the event bus and logging pipeline under one roof.
//! Keep this crate thin: it should compose other crates, not implement messaging logic.
//!
//! ## Usage
//! - Add `herald` and pull the bus and logger from one place.
//! - Depend on `herald-event-bus` or `herald-logger` directly when only one
//!   side is needed.

pub use herald_event_bus as events;
pub use herald_logger as logger;

pub use herald_event_bus::{Event, EventBus, EventBusError, EventBusErrorExt, Subscription};
pub use herald_logger::{
    ConsoleHandler, DetailedFormatter, ExcludeLevel, FileHandler, Filter, Formatter, Handler,
    Level, Logger, LoggerBuilder, LoggerError, LoggerErrorExt, MemoryHandler, Record,
    SimpleFormatter,
};
