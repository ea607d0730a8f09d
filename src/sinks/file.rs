//! File sink implementation
//!
//! The facade performs no file I/O itself: delivery invokes an injected
//! callback with the formatted payload. With no callback configured,
//! delivery silently does nothing.

use super::{panic_message, Sink};
use crate::core::{LoggerConfig, LoggerError, Payload, Result, Severity};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

pub struct FileSink {
    config: Arc<RwLock<LoggerConfig>>,
}

impl FileSink {
    pub fn new(config: Arc<RwLock<LoggerConfig>>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Sink for FileSink {
    async fn deliver(&self, _level: Severity, payload: &Payload) -> Result<()> {
        let callback = { self.config.read().file_sink.clone() };
        let Some(callback) = callback else {
            return Ok(());
        };

        // A panicking callback is isolated and surfaced as a sink error.
        catch_unwind(AssertUnwindSafe(|| callback(payload)))
            .map_err(|panic| LoggerError::sink("file-sink", panic_message(panic)))
    }

    fn name(&self) -> &str {
        "file-sink"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[tokio::test]
    async fn test_deliver_without_callback_is_noop() {
        let config = Arc::new(RwLock::new(LoggerConfig::default()));
        let sink = FileSink::new(config);

        let result = sink
            .deliver(Severity::Info, &Payload::Line("x".to_string()))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_deliver_invokes_callback_with_payload() {
        let captured: Arc<Mutex<Vec<Payload>>> = Arc::new(Mutex::new(Vec::new()));
        let captured_clone = Arc::clone(&captured);

        let config = Arc::new(RwLock::new(LoggerConfig {
            file_sink: Some(Arc::new(move |payload: &Payload| {
                captured_clone.lock().push(payload.clone());
            })),
            ..Default::default()
        }));
        let sink = FileSink::new(config);

        let payload = Payload::Line("written".to_string());
        sink.deliver(Severity::Info, &payload).await.unwrap();

        assert_eq!(*captured.lock(), vec![payload]);
    }

    #[tokio::test]
    async fn test_panicking_callback_becomes_sink_error() {
        let config = Arc::new(RwLock::new(LoggerConfig {
            file_sink: Some(Arc::new(|_: &Payload| panic!("disk on fire"))),
            ..Default::default()
        }));
        let sink = FileSink::new(config);

        let result = sink
            .deliver(Severity::Warn, &Payload::Line("x".to_string()))
            .await;
        match result {
            Err(LoggerError::Sink { message, .. }) => assert_eq!(message, "disk on fire"),
            other => panic!("expected sink error, got {:?}", other),
        }
    }
}
