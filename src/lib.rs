//! # Fanout Logger
//!
//! An application-side logging facade that fans log records out to multiple
//! destinations: the console, a crash/analytics SDK, a remote HTTP endpoint,
//! and an injected file-sink callback.
//!
//! ## Features
//!
//! - **Severity filtering**: a single minimum-level threshold, with a `None`
//!   sentinel that silences all output
//! - **Per-destination shapes**: flat console records, preformatted SDK
//!   lines, nested remote/file records, plus full custom-formatter overrides
//! - **Contained failures**: a log call never raises to its caller; every
//!   delivery failure degrades to a console notice
//! - **Ordered delivery**: destinations within one call are delivered
//!   strictly in sequence

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        default_format, Destination, FieldValue, Fields, FlatRecord, LogRecord, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, NestedRecord, Payload, Result, Severity,
    };
    pub use crate::sinks::{CrashReport, CrashSdk, NoopCrashSdk, Sink};
}

pub use crate::core::{
    default_format, Destination, FieldValue, Fields, FlatRecord, LogRecord, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, NestedRecord, Payload, Result, Severity,
};
pub use crate::sinks::{CrashReport, CrashSdk, NoopCrashSdk, Sink};
