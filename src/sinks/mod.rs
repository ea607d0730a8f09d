//! Destination sinks
//!
//! One sink per destination tag, registered once at logger construction.
//! Custom formatter overrides replace the formatter entry only, never the
//! delivery function.

pub mod console;
pub mod crash_sdk;
pub mod file;
pub mod http;

pub use console::ConsoleSink;
pub use crash_sdk::{CrashReport, CrashSdk, CrashSdkSink, NoopCrashSdk};
pub use file::FileSink;
pub use http::HttpSink;

use crate::core::{Destination, LoggerConfig, Payload, Result, Severity};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

/// Trait for destination sinks
///
/// A sink accepts a formatted payload and attempts delivery, possibly
/// failing. The dispatcher contains the failure; a sink never needs to.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Deliver a formatted payload at the given severity
    async fn deliver(&self, level: Severity, payload: &Payload) -> Result<()>;

    /// Get the sink name
    fn name(&self) -> &str;
}

/// Fixed table mapping destination tag to delivery function, built once at
/// logger construction.
pub(crate) struct SinkRegistry {
    console: ConsoleSink,
    crash_sdk: CrashSdkSink,
    http: HttpSink,
    file: FileSink,
}

impl SinkRegistry {
    pub(crate) fn new(
        config: Arc<RwLock<LoggerConfig>>,
        sdk: Arc<dyn CrashSdk>,
        console_colors: bool,
    ) -> Self {
        Self {
            console: ConsoleSink::with_colors(console_colors),
            crash_sdk: CrashSdkSink::new(sdk),
            http: HttpSink::new(Arc::clone(&config)),
            file: FileSink::new(config),
        }
    }

    pub(crate) fn get(&self, destination: Destination) -> &dyn Sink {
        match destination {
            Destination::Console => &self.console,
            Destination::CrashSdk => &self.crash_sdk,
            Destination::HttpRemote => &self.http,
            Destination::FileSink => &self.file,
        }
    }
}

/// Extract a printable message from a caught panic payload
pub(crate) fn panic_message(panic_info: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
