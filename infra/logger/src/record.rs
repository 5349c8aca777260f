use chrono::{DateTime, Utc};
use std::fmt;

/// Severity levels, ordered from most to least critical.
///
/// A record passes the pipeline's level gate when its level is at most the
/// logger's configured minimum (`Error` being the lowest value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Level {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One log entry flowing through the pipeline.
///
/// Ids are assigned per logger in emission order; a vetoed record consumes
/// its id, so ids are monotonically increasing but not necessarily
/// contiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: u64,
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
