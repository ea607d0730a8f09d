//! Main logger implementation
//!
//! A `Logger` pairs a shared [`LoggerConfig`] with a fixed sink registry and
//! dispatches log records to each configured destination in order. Delivery
//! failures degrade to a console notice; a log call never raises to its
//! caller.

use super::{
    config::{Destination, FileSinkFn, FormatFn, LoggerConfig},
    fields::{FieldValue, Fields},
    payload::{default_format, Payload},
    record::LogRecord,
    severity::Severity,
};
use crate::sinks::{panic_message, CrashReport, CrashSdk, NoopCrashSdk, SinkRegistry};
use parking_lot::RwLock;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Multi-destination logging facade.
///
/// Cloning is cheap and every clone shares the same configuration, so a
/// `Logger` can be handed to any task that needs it. The fire-and-forget
/// convenience methods (`debug`, `info`, `warn`, `error`, ...) spawn onto
/// the current tokio runtime and return a join handle the caller is free to
/// ignore; callers that need delivery completion should await
/// [`Logger::dispatch`] directly.
#[derive(Clone)]
pub struct Logger {
    config: Arc<RwLock<LoggerConfig>>,
    sdk: Arc<dyn CrashSdk>,
    sinks: Arc<SinkRegistry>,
}

impl Logger {
    /// Create a logger with default configuration and no crash-reporting
    /// backend
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    // ---- configuration setters (fluent, infallible) ----

    pub fn set_min_level(&self, level: Severity) -> &Self {
        self.config.write().min_level = level;
        self
    }

    pub fn set_destinations(&self, destinations: Vec<Destination>) -> &Self {
        self.config.write().destinations = destinations;
        self
    }

    /// Shallow-merge fields into the global context; same-named keys are
    /// overwritten, nested values are never deep-merged.
    pub fn set_context(&self, context: Fields) -> &Self {
        self.config.write().context.merge(&context);
        self
    }

    pub fn set_context_field<K, V>(&self, key: K, value: V) -> &Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.config.write().context.add_field(key, value);
        self
    }

    pub fn set_enabled(&self, enabled: bool) -> &Self {
        self.config.write().enabled = enabled;
        self
    }

    /// Register a custom formatter that fully overrides the default for one
    /// destination
    pub fn set_formatter<F>(&self, destination: Destination, formatter: F) -> &Self
    where
        F: Fn(&LogRecord) -> Payload + Send + Sync + 'static,
    {
        self.config
            .write()
            .formatters
            .insert(destination, Arc::new(formatter));
        self
    }

    pub fn set_remote_endpoint(&self, url: impl Into<String>) -> &Self {
        self.config.write().remote_endpoint = Some(url.into());
        self
    }

    pub fn set_file_sink<F>(&self, callback: F) -> &Self
    where
        F: Fn(&Payload) + Send + Sync + 'static,
    {
        self.config.write().file_sink = Some(Arc::new(callback));
        self
    }

    // ---- configuration accessors ----

    pub fn min_level(&self) -> Severity {
        self.config.read().min_level
    }

    pub fn destinations(&self) -> Vec<Destination> {
        self.config.read().destinations.clone()
    }

    pub fn context(&self) -> Fields {
        self.config.read().context.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.config.read().enabled
    }

    // ---- dispatch ----

    /// True when a call at `level` would be delivered: the logger is enabled
    /// and the level's rank reaches the configured minimum. A minimum of
    /// `Severity::None` outranks every real level and silences everything.
    pub fn should_emit(&self, level: Severity) -> bool {
        let config = self.config.read();
        config.enabled && level.rank() >= config.min_level.rank()
    }

    /// Format a record for one destination: a registered custom formatter
    /// fully overrides the built-in default shape.
    pub fn format(&self, destination: Destination, record: &LogRecord) -> Payload {
        let custom = { self.config.read().formatters.get(&destination).cloned() };
        match custom {
            Some(formatter) => formatter(record),
            None => default_format(destination, record),
        }
    }

    /// Dispatch one log call to the given destinations, or to the configured
    /// default list when none are given.
    ///
    /// Destinations are delivered strictly in order: destination N+1 does
    /// not start until destination N's attempt has completed, success or
    /// failure. Each destination gets a freshly timestamped record. Every
    /// failure (formatter panic included) degrades to a console notice; this
    /// method never panics across the loop and never returns an error.
    pub async fn dispatch(
        &self,
        level: Severity,
        message: &str,
        data: Fields,
        destinations: Option<Vec<Destination>>,
    ) {
        if !self.should_emit(level) {
            return;
        }

        let (targets, context) = {
            let config = self.config.read();
            (
                destinations.unwrap_or_else(|| config.destinations.clone()),
                config.context.clone(),
            )
        };

        for destination in targets {
            let record = LogRecord::new(level, message, data.clone(), context.clone());

            let payload = match catch_unwind(AssertUnwindSafe(|| self.format(destination, &record)))
            {
                Ok(payload) => payload,
                Err(panic) => {
                    eprintln!(
                        "[LOGGER ERROR] Formatter for {} panicked: {}",
                        destination,
                        panic_message(panic)
                    );
                    continue;
                }
            };

            if let Err(e) = self.sinks.get(destination).deliver(level, &payload).await {
                eprintln!("[LOGGER ERROR] Delivery to {} failed: {}", destination, e);
            }
        }
    }

    // ---- fire-and-forget convenience wrappers ----

    /// Spawn a dispatch at `level` to the configured destinations.
    ///
    /// Must be called within a tokio runtime. The returned handle may be
    /// ignored; there is no delivery confirmation.
    pub fn log(&self, level: Severity, message: impl Into<String>, data: Fields) -> JoinHandle<()> {
        let logger = self.clone();
        let message = message.into();
        tokio::spawn(async move { logger.dispatch(level, &message, data, None).await })
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>, data: Fields) -> JoinHandle<()> {
        self.log(Severity::Debug, message, data)
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>, data: Fields) -> JoinHandle<()> {
        self.log(Severity::Info, message, data)
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>, data: Fields) -> JoinHandle<()> {
        self.log(Severity::Warn, message, data)
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>, data: Fields) -> JoinHandle<()> {
        self.log(Severity::Error, message, data)
    }

    /// Log to the console destination only, bypassing the configured list
    pub fn console_only(
        &self,
        level: Severity,
        message: impl Into<String>,
        data: Fields,
    ) -> JoinHandle<()> {
        let logger = self.clone();
        let message = message.into();
        tokio::spawn(async move {
            logger
                .dispatch(level, &message, data, Some(vec![Destination::Console]))
                .await
        })
    }

    /// Log to the crash-SDK destination only, bypassing the configured list
    pub fn sdk_only(
        &self,
        level: Severity,
        message: impl Into<String>,
        data: Fields,
    ) -> JoinHandle<()> {
        let logger = self.clone();
        let message = message.into();
        tokio::spawn(async move {
            logger
                .dispatch(level, &message, data, Some(vec![Destination::CrashSdk]))
                .await
        })
    }

    // ---- SDK-coupled operations ----

    /// Log a named user event at info level to the SDK destination, then
    /// invoke the SDK's native user-event API.
    ///
    /// The log half runs inside the dispatcher's normal failure containment.
    /// The native user-event call is a second, independent statement with no
    /// containment of its own; its error propagates to the caller.
    pub async fn log_user_event(&self, name: &str, data: Fields) -> crate::core::Result<()> {
        self.dispatch(
            Severity::Info,
            name,
            data.clone(),
            Some(vec![Destination::CrashSdk]),
        )
        .await;

        self.sdk.record_user_event(name, &data).await
    }

    /// Log a crash-level entry through the normal dispatch path, and
    /// unconditionally forward a structured crash report to the
    /// crash-reporting backend, regardless of the configured destinations or
    /// the enabled flag. A failing report degrades to a console notice.
    pub async fn report_crash(&self, name: &str, message: &str, data: Fields) {
        self.dispatch(Severity::Crash, message, data.clone(), None)
            .await;

        let report = CrashReport::from_fields(name, message, &data);
        if let Err(e) = self.sdk.report_error(&report).await {
            eprintln!("[LOGGER ERROR] Crash report delivery failed: {}", e);
        }
    }

    /// One-time application setup: route logs to console and the crash SDK,
    /// merge application info into the global context, lower the threshold
    /// to debug in development builds, and announce initialization.
    ///
    /// Setup failures degrade to a console notice inside `dispatch`; the
    /// application continues with whatever configuration succeeded.
    pub async fn init(&self, development: bool, app_info: Fields) {
        self.set_destinations(vec![Destination::Console, Destination::CrashSdk])
            .set_context(app_info)
            .set_min_level(if development {
                Severity::Debug
            } else {
                Severity::Info
            });

        self.dispatch(Severity::Info, "logger initialized", Fields::new(), None)
            .await;
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use fanout_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(Severity::Debug)
///     .destinations(vec![Destination::Console, Destination::FileSink])
///     .context_field("service", "api-gateway")
///     .build();
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    sdk: Option<Arc<dyn CrashSdk>>,
    console_colors: bool,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            sdk: None,
            console_colors: true,
        }
    }

    /// Set minimum severity level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: Severity) -> Self {
        self.config.min_level = level;
        self
    }

    /// Replace the default destination list
    #[must_use = "builder methods return a new value"]
    pub fn destinations(mut self, destinations: Vec<Destination>) -> Self {
        self.config.destinations = destinations;
        self
    }

    /// Add a global context field
    #[must_use = "builder methods return a new value"]
    pub fn context_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.config.context.add_field(key, value);
        self
    }

    /// Enable or disable all output
    #[must_use = "builder methods return a new value"]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    /// Register a custom formatter for one destination
    #[must_use = "builder methods return a new value"]
    pub fn formatter<F>(mut self, destination: Destination, formatter: F) -> Self
    where
        F: Fn(&LogRecord) -> Payload + Send + Sync + 'static,
    {
        self.config
            .formatters
            .insert(destination, Arc::new(formatter) as FormatFn);
        self
    }

    /// Set the remote HTTP endpoint for the http-remote destination
    #[must_use = "builder methods return a new value"]
    pub fn remote_endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.remote_endpoint = Some(url.into());
        self
    }

    /// Install the file-sink write callback
    #[must_use = "builder methods return a new value"]
    pub fn file_sink<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Payload) + Send + Sync + 'static,
    {
        self.config.file_sink = Some(Arc::new(callback) as FileSinkFn);
        self
    }

    /// Wire up the crash/analytics SDK backend
    #[must_use = "builder methods return a new value"]
    pub fn crash_sdk(mut self, sdk: Arc<dyn CrashSdk>) -> Self {
        self.sdk = Some(sdk);
        self
    }

    /// Enable or disable colored console level tags
    #[must_use = "builder methods return a new value"]
    pub fn console_colors(mut self, enabled: bool) -> Self {
        self.console_colors = enabled;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let config = Arc::new(RwLock::new(self.config));
        let sdk = self.sdk.unwrap_or_else(|| Arc::new(NoopCrashSdk));
        let sinks = Arc::new(SinkRegistry::new(
            Arc::clone(&config),
            Arc::clone(&sdk),
            self.console_colors,
        ));

        Logger { config, sdk, sinks }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_emit_threshold() {
        let logger = Logger::builder().min_level(Severity::Warn).build();

        assert!(!logger.should_emit(Severity::Debug));
        assert!(!logger.should_emit(Severity::Info));
        assert!(logger.should_emit(Severity::Warn));
        assert!(logger.should_emit(Severity::Error));
        assert!(logger.should_emit(Severity::Crash));
    }

    #[test]
    fn test_should_emit_disabled() {
        let logger = Logger::builder().enabled(false).build();
        assert!(!logger.should_emit(Severity::Crash));

        logger.set_enabled(true);
        assert!(logger.should_emit(Severity::Crash));
    }

    #[test]
    fn test_none_sentinel_silences_everything() {
        let logger = Logger::new();
        logger.set_min_level(Severity::None);

        for level in [
            Severity::Debug,
            Severity::Info,
            Severity::Warn,
            Severity::Error,
            Severity::Crash,
        ] {
            assert!(!logger.should_emit(level));
        }
    }

    #[test]
    fn test_setter_chaining() {
        let logger = Logger::new();
        logger
            .set_min_level(Severity::Debug)
            .set_destinations(vec![Destination::Console, Destination::FileSink])
            .set_enabled(true)
            .set_context_field("app", "demo");

        assert_eq!(logger.min_level(), Severity::Debug);
        assert_eq!(
            logger.destinations(),
            vec![Destination::Console, Destination::FileSink]
        );
        assert_eq!(
            logger.context().get("app"),
            Some(&FieldValue::String("demo".into()))
        );
    }

    #[test]
    fn test_context_merge_is_shallow_last_write_wins() {
        let logger = Logger::new();
        logger.set_context(Fields::new().with_field("env", "staging").with_field("v", 1));
        logger.set_context(Fields::new().with_field("env", "production"));

        let context = logger.context();
        assert_eq!(
            context.get("env"),
            Some(&FieldValue::String("production".into()))
        );
        assert_eq!(context.get("v"), Some(&FieldValue::Int(1)));
    }

    #[test]
    fn test_custom_formatter_overrides_default() {
        let logger = Logger::new();
        logger.set_formatter(Destination::Console, |record: &LogRecord| {
            Payload::Line(format!("custom {}", record.message))
        });

        let record = LogRecord::new(Severity::Info, "hello", Fields::new(), Fields::new());

        // Overridden destination gets the custom shape...
        assert_eq!(
            logger.format(Destination::Console, &record),
            Payload::Line("custom hello".to_string())
        );
        // ...other destinations keep their defaults.
        assert!(matches!(
            logger.format(Destination::FileSink, &record),
            Payload::Nested(_)
        ));
    }

    #[test]
    fn test_custom_formatter_receives_full_record() {
        let logger = Logger::new();
        logger.set_formatter(Destination::FileSink, |record: &LogRecord| {
            Payload::Line(format!(
                "{}|{}|{}|{}|{}",
                record.timestamp_iso8601(),
                record.level,
                record.message,
                record.data.len(),
                record.context.len()
            ))
        });

        let record = LogRecord::new(
            Severity::Warn,
            "m",
            Fields::new().with_field("a", 1),
            Fields::new().with_field("b", 2).with_field("c", 3),
        );
        match logger.format(Destination::FileSink, &record) {
            Payload::Line(line) => {
                assert!(line.contains("|WARN|m|1|2"));
            }
            other => panic!("expected line payload, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dispatch_with_empty_destinations_logs_nowhere() {
        let logger = Logger::new();
        logger.set_destinations(Vec::new());

        // Nothing to deliver to; must still complete without error.
        logger
            .dispatch(Severity::Error, "void", Fields::new(), None)
            .await;
    }

    #[tokio::test]
    async fn test_init_configures_and_announces() {
        let logger = Logger::builder().console_colors(false).build();
        logger
            .init(true, Fields::new().with_field("version", "1.2.3"))
            .await;

        assert_eq!(logger.min_level(), Severity::Debug);
        assert_eq!(
            logger.destinations(),
            vec![Destination::Console, Destination::CrashSdk]
        );
        assert_eq!(
            logger.context().get("version"),
            Some(&FieldValue::String("1.2.3".into()))
        );

        let logger = Logger::builder().console_colors(false).build();
        logger.init(false, Fields::new()).await;
        assert_eq!(logger.min_level(), Severity::Info);
    }
}
