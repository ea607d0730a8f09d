//! Core logger types and traits

pub mod config;
pub mod error;
pub mod fields;
pub mod logger;
pub mod payload;
pub mod record;
pub mod severity;

pub use config::{Destination, FileSinkFn, FormatFn, LoggerConfig};
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use logger::{Logger, LoggerBuilder};
pub use payload::{default_format, FlatRecord, NestedRecord, Payload};
pub use record::LogRecord;
pub use severity::Severity;
