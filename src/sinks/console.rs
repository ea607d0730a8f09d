//! Console sink implementation

use super::Sink;
use crate::core::{Payload, Result, Severity};
use async_trait::async_trait;
use colored::Colorize;

/// Writes formatted payloads to stdout or stderr, selected by severity:
/// Debug/Info/Warn go to stdout, Error/Crash to stderr.
pub struct ConsoleSink {
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn render(&self, level: Severity, payload: &Payload) -> Result<String> {
        let body = match payload {
            Payload::Line(line) => line.clone(),
            other => serde_json::to_string(other)?,
        };

        let tag = if self.use_colors {
            format!("{:5}", level.to_str())
                .color(level.color_code())
                .to_string()
        } else {
            format!("{:5}", level.to_str())
        };

        Ok(format!("[{}] {}", tag, body))
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Sink for ConsoleSink {
    async fn deliver(&self, level: Severity, payload: &Payload) -> Result<()> {
        let line = self.render(level, payload)?;
        if level.is_error_stream() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
