//! Crash/analytics SDK integration
//!
//! The SDK is an external collaborator consumed through five operations:
//! leveled log calls, a native user-event call, and a structured crash
//! report. Any implementation may fail; containment happens in the
//! dispatcher, not here.

use super::Sink;
use crate::core::{FieldValue, Fields, Payload, Result, Severity};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Placeholder used when a crash report carries no stack information.
const STACK_PLACEHOLDER: &str = "stack unavailable";

/// Structured error forwarded to the crash-reporting backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrashReport {
    pub name: String,
    pub message: String,
    /// The `cause` data field if present, otherwise the whole data map.
    pub cause: serde_json::Value,
    /// The `stack` data field if present, otherwise a placeholder.
    pub stack: String,
}

impl CrashReport {
    pub fn from_fields(name: impl Into<String>, message: impl Into<String>, data: &Fields) -> Self {
        let cause = match data.get("cause") {
            Some(value) => value.to_json_value(),
            None => serde_json::Value::Object(data.to_json_object()),
        };
        let stack = match data.get("stack") {
            Some(FieldValue::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => STACK_PLACEHOLDER.to_string(),
        };

        Self {
            name: name.into(),
            message: message.into(),
            cause,
            stack,
        }
    }
}

/// External crash/analytics SDK operations
#[async_trait]
pub trait CrashSdk: Send + Sync {
    /// Record a line at the SDK's info level
    async fn log_info(&self, line: &str) -> Result<()>;

    /// Record a line at the SDK's warn level
    async fn log_warn(&self, line: &str) -> Result<()>;

    /// Record a line at the SDK's error level
    async fn log_error(&self, line: &str) -> Result<()>;

    /// Record a named user event with its data
    async fn record_user_event(&self, name: &str, data: &Fields) -> Result<()>;

    /// Forward a structured crash report
    async fn report_error(&self, report: &CrashReport) -> Result<()>;
}

/// SDK implementation that accepts and discards everything. Used when an
/// application has no crash-reporting backend wired up.
pub struct NoopCrashSdk;

#[async_trait]
impl CrashSdk for NoopCrashSdk {
    async fn log_info(&self, _line: &str) -> Result<()> {
        Ok(())
    }

    async fn log_warn(&self, _line: &str) -> Result<()> {
        Ok(())
    }

    async fn log_error(&self, _line: &str) -> Result<()> {
        Ok(())
    }

    async fn record_user_event(&self, _name: &str, _data: &Fields) -> Result<()> {
        Ok(())
    }

    async fn report_error(&self, _report: &CrashReport) -> Result<()> {
        Ok(())
    }
}

/// Sink adapter routing payloads to the SDK's leveled log calls:
/// Debug/Info go to `log_info`, Warn to `log_warn`, Error/Crash to
/// `log_error`.
pub struct CrashSdkSink {
    sdk: Arc<dyn CrashSdk>,
}

impl CrashSdkSink {
    pub fn new(sdk: Arc<dyn CrashSdk>) -> Self {
        Self { sdk }
    }

    fn line_of(payload: &Payload) -> Result<String> {
        match payload {
            Payload::Line(line) => Ok(line.clone()),
            // A custom formatter may hand this sink another shape.
            other => Ok(serde_json::to_string(other)?),
        }
    }
}

#[async_trait]
impl Sink for CrashSdkSink {
    async fn deliver(&self, level: Severity, payload: &Payload) -> Result<()> {
        let line = Self::line_of(payload)?;
        match level {
            Severity::Debug | Severity::Info => self.sdk.log_info(&line).await,
            Severity::Warn => self.sdk.log_warn(&line).await,
            _ => self.sdk.log_error(&line).await,
        }
    }

    fn name(&self) -> &str {
        "crash-sdk"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct RecordingSdk {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingSdk {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CrashSdk for RecordingSdk {
        async fn log_info(&self, line: &str) -> Result<()> {
            self.calls.lock().push(format!("info:{}", line));
            Ok(())
        }

        async fn log_warn(&self, line: &str) -> Result<()> {
            self.calls.lock().push(format!("warn:{}", line));
            Ok(())
        }

        async fn log_error(&self, line: &str) -> Result<()> {
            self.calls.lock().push(format!("error:{}", line));
            Ok(())
        }

        async fn record_user_event(&self, name: &str, _data: &Fields) -> Result<()> {
            self.calls.lock().push(format!("event:{}", name));
            Ok(())
        }

        async fn report_error(&self, report: &CrashReport) -> Result<()> {
            self.calls.lock().push(format!("report:{}", report.name));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_severity_routes_to_sdk_call() {
        let sdk = RecordingSdk::new();
        let sink = CrashSdkSink::new(Arc::clone(&sdk) as Arc<dyn CrashSdk>);
        let payload = Payload::Line("l".to_string());

        sink.deliver(Severity::Debug, &payload).await.unwrap();
        sink.deliver(Severity::Info, &payload).await.unwrap();
        sink.deliver(Severity::Warn, &payload).await.unwrap();
        sink.deliver(Severity::Error, &payload).await.unwrap();
        sink.deliver(Severity::Crash, &payload).await.unwrap();

        let calls = sdk.calls.lock();
        assert_eq!(
            *calls,
            vec!["info:l", "info:l", "warn:l", "error:l", "error:l"]
        );
    }

    #[test]
    fn test_crash_report_uses_cause_and_stack_fields() {
        let data = Fields::new()
            .with_field("cause", "null deref")
            .with_field("stack", "at foo()");
        let report = CrashReport::from_fields("TypeError", "null deref", &data);

        assert_eq!(report.name, "TypeError");
        assert_eq!(report.cause, serde_json::json!("null deref"));
        assert_eq!(report.stack, "at foo()");
    }

    #[test]
    fn test_crash_report_fallbacks() {
        let data = Fields::new().with_field("code", 7);
        let report = CrashReport::from_fields("Panic", "oops", &data);

        // No `cause` field: the whole data map becomes the cause.
        assert_eq!(report.cause, serde_json::json!({"code": 7}));
        assert_eq!(report.stack, STACK_PLACEHOLDER);
    }
}
