//! Logger configuration: destinations, thresholds, context, overrides

use super::fields::Fields;
use super::payload::Payload;
use super::record::LogRecord;
use super::severity::Severity;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Delivery destination for a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Console,
    CrashSdk,
    HttpRemote,
    FileSink,
}

impl Destination {
    pub fn to_str(&self) -> &'static str {
        match self {
            Destination::Console => "console",
            Destination::CrashSdk => "crash-sdk",
            Destination::HttpRemote => "http-remote",
            Destination::FileSink => "file-sink",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Custom formatter: fully replaces the default formatter for one
/// destination and receives the complete record (timestamp, level, message,
/// data, context snapshot).
pub type FormatFn = Arc<dyn Fn(&LogRecord) -> Payload + Send + Sync>;

/// Injected file-sink callback; the crate performs no file I/O itself.
pub type FileSinkFn = Arc<dyn Fn(&Payload) + Send + Sync>;

/// Mutable logger settings, shared by the dispatcher for the process
/// lifetime.
///
/// No validation is performed on any field: an empty destination list simply
/// means "log nowhere".
#[derive(Clone)]
pub struct LoggerConfig {
    pub min_level: Severity,
    pub destinations: Vec<Destination>,
    pub context: Fields,
    pub enabled: bool,
    pub formatters: HashMap<Destination, FormatFn>,
    pub remote_endpoint: Option<String>,
    pub file_sink: Option<FileSinkFn>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: Severity::Info,
            destinations: vec![Destination::Console],
            context: Fields::new(),
            enabled: true,
            formatters: HashMap::new(),
            remote_endpoint: None,
            file_sink: None,
        }
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("min_level", &self.min_level)
            .field("destinations", &self.destinations)
            .field("context", &self.context)
            .field("enabled", &self.enabled)
            .field("formatters", &self.formatters.keys().collect::<Vec<_>>())
            .field("remote_endpoint", &self.remote_endpoint)
            .field("file_sink", &self.file_sink.is_some())
            .finish()
    }
}
