//! # Logger
//!
//! A composable logging pipeline for the project. Records flow through a
//! minimum-level gate, zero-or-more veto [`Filter`]s, a single [`Formatter`]
//! pass, and fan out to one-or-more [`Handler`]s.
//!
//! * The pipeline is assembled with [`Logger::builder`]; a configuration
//!   without handlers is rejected at build time.
//! * When no formatter is set, [`SimpleFormatter`] is injected.
//! * [`Logger`] is `Send + Sync`; share it behind an `Arc` to log from
//!   several threads or from event bus subscriber callbacks.
//!
//! ## Example
//!
//! ```rust
//! use herald_logger::{Level, Logger, MemoryHandler};
//!
//! # fn main() -> Result<(), herald_logger::LoggerError> {
//! let sink = MemoryHandler::new();
//! let logger = Logger::builder()
//!     .level(Level::Debug)
//!     .handler(sink.clone())
//!     .build()?;
//!
//! logger.info("pipeline up");
//! assert_eq!(sink.lines(), ["[INFO]: pipeline up"]);
//! # Ok(())
//! # }
//! ```

mod error;
mod filter;
mod format;
mod handler;
mod record;

pub use error::{LoggerError, LoggerErrorExt};
pub use filter::{ExcludeLevel, Filter};
pub use format::{DetailedFormatter, Formatter, SimpleFormatter};
pub use handler::{ConsoleHandler, FileHandler, Handler, MemoryHandler};
pub use record::{Level, Record};

use chrono::Utc;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A configured logging pipeline.
///
/// Per record: level gate, filters (any may veto), id assignment, one format
/// pass, delivery to every handler.
pub struct Logger {
    level: Level,
    formatter: Box<dyn Formatter>,
    filters: Vec<Box<dyn Filter>>,
    handlers: Vec<Box<dyn Handler>>,
    counter: AtomicU64,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`] with an `Info` level gate, no filters,
    /// and no handlers.
    #[must_use = "The builder must be configured before it can be used to build the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Emits `message` at `level` through the pipeline.
    pub fn log(&self, level: Level, message: impl Into<String>) {
        if level > self.level {
            return;
        }
        let record = Record {
            id: self.counter.fetch_add(1, Ordering::Relaxed) + 1,
            level,
            message: message.into(),
            timestamp: Utc::now(),
        };
        if self.filters.iter().any(|filter| !filter.allows(&record)) {
            return;
        }
        let formatted = self.formatter.format(&record);
        for handler in &self.handlers {
            handler.publish(&record, &formatted);
        }
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(Level::Warn, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    pub fn trace(&self, message: impl Into<String>) {
        self.log(Level::Trace, message);
    }

    /// Configured minimum level.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("filters", &self.filters.len())
            .field("handlers", &self.handlers.len())
            .field("records", &self.counter.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// A builder for configuring a [`Logger`] pipeline.
#[must_use = "The builder must be configured before it can be used to build the logger."]
pub struct LoggerBuilder {
    level: Level,
    formatter: Option<Box<dyn Formatter>>,
    filters: Vec<Box<dyn Filter>>,
    handlers: Vec<Box<dyn Handler>>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self { level: Level::Info, formatter: None, filters: Vec::new(), handlers: Vec::new() }
    }
}

impl LoggerBuilder {
    /// Configures the minimum level to be emitted.
    #[must_use = "The builder must be configured before it can be used to build the logger."]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the pipeline's single formatter.
    ///
    /// [`SimpleFormatter`] is injected when none is set.
    #[must_use = "The builder must be configured before it can be used to build the logger."]
    pub fn formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Adds a filter. Any filter may veto a record.
    #[must_use = "The builder must be configured before it can be used to build the logger."]
    pub fn filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Adds a handler. Every surviving record reaches every handler.
    #[must_use = "The builder must be configured before it can be used to build the logger."]
    pub fn handler(mut self, handler: impl Handler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Consumes the builder and produces the pipeline.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] if no handler was added.
    pub fn build(self) -> Result<Logger, LoggerError> {
        if self.handlers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No handlers configured. Add at least one handler.".into(),
                context: None,
            });
        }
        Ok(Logger {
            level: self.level,
            formatter: self.formatter.unwrap_or_else(|| Box::new(SimpleFormatter)),
            filters: self.filters,
            handlers: self.handlers,
            counter: AtomicU64::new(0),
        })
    }
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("level", &self.level)
            .field("formatter", &self.formatter.is_some())
            .field("filters", &self.filters.len())
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_initial_state() {
        let builder = Logger::builder();
        assert_eq!(builder.level, Level::Info);
        assert!(builder.formatter.is_none());
        assert!(builder.filters.is_empty());
        assert!(builder.handlers.is_empty());
    }

    #[test]
    fn test_build_without_handlers_is_rejected() {
        let result = Logger::builder().level(Level::Debug).build();
        assert!(matches!(result, Err(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_default_formatter_is_injected() -> Result<(), LoggerError> {
        let sink = MemoryHandler::new();
        let logger = Logger::builder().handler(sink.clone()).build()?;

        logger.warn("disk almost full");
        assert_eq!(sink.lines(), ["[WARN]: disk almost full"]);
        Ok(())
    }

    #[test]
    fn test_configured_level_is_reported() -> Result<(), LoggerError> {
        let logger =
            Logger::builder().level(Level::Trace).handler(MemoryHandler::new()).build()?;
        assert_eq!(logger.level(), Level::Trace);
        Ok(())
    }
}
