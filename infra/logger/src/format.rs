use crate::record::Record;
use chrono::SecondsFormat;

/// Renders a [`Record`] into its final textual form.
///
/// The logger holds exactly one formatter and renders each surviving record
/// once; every handler receives the same rendered line.
pub trait Formatter: Send + Sync {
    fn format(&self, record: &Record) -> String;
}

/// `[LEVEL]: message` rendering. Injected when the builder gets no formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleFormatter;

impl Formatter for SimpleFormatter {
    fn format(&self, record: &Record) -> String {
        format!("[{}]: {}", record.level, record.message)
    }
}

/// `(id) timestamp [LEVEL]: message` rendering for diagnostic-heavy sinks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailedFormatter;

impl Formatter for DetailedFormatter {
    fn format(&self, record: &Record) -> String {
        format!(
            "({}) {} [{}]: {}",
            record.id,
            record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            record.level,
            record.message
        )
    }
}
