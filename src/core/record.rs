//! Log record structure

use super::fields::Fields;
use super::severity::Severity;
use chrono::{DateTime, SecondsFormat, Utc};

/// One in-flight log record, built fresh for each destination dispatch.
///
/// The timestamp is captured at construction time, so two destinations in
/// the same call may carry slightly different timestamps.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: Severity,
    pub message: String,
    pub data: Fields,
    pub context: Fields,
}

impl LogRecord {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so one record always renders as one console or file line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: Severity, message: impl Into<String>, data: Fields, context: Fields) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: Self::sanitize_message(&message.into()),
            data,
            context,
        }
    }

    /// ISO-8601 timestamp string used by every payload shape.
    pub fn timestamp_iso8601(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
