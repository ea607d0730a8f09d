//! Per-destination payload shapes and their default formatters
//!
//! Each destination has a fixed built-in shape:
//! - console gets a flat record with data and context spread to the top level
//! - the crash SDK gets a single preformatted line
//! - the HTTP remote and the file sink get a nested record that keeps data
//!   and context as separate sub-objects
//!
//! A custom formatter registered for a destination replaces the default
//! entirely and may return any of the shapes.

use super::config::Destination;
use super::fields::{FieldValue, Fields};
use super::record::LogRecord;
use super::severity::Severity;
use serde::Serialize;
use std::collections::HashMap;

/// Formatted payload handed to a destination's sink
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Flat object: `{timestamp, level, message, ...data, ...context}`
    Flat(FlatRecord),
    /// Single preformatted line
    Line(String),
    /// Nested object: `{timestamp, level, message, data, context}`
    Nested(NestedRecord),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatRecord {
    pub timestamp: String,
    pub level: Severity,
    pub message: String,
    /// Data and context spread to the top level; context wins on collision.
    #[serde(flatten)]
    pub fields: HashMap<String, FieldValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedRecord {
    pub timestamp: String,
    pub level: Severity,
    pub message: String,
    pub data: Fields,
    pub context: Fields,
}

/// Apply the built-in default formatter for a destination.
pub fn default_format(destination: Destination, record: &LogRecord) -> Payload {
    match destination {
        Destination::Console => Payload::Flat(flat_record(record)),
        Destination::CrashSdk => Payload::Line(sdk_line(record)),
        Destination::HttpRemote | Destination::FileSink => Payload::Nested(NestedRecord {
            timestamp: record.timestamp_iso8601(),
            level: record.level,
            message: record.message.clone(),
            data: record.data.clone(),
            context: record.context.clone(),
        }),
    }
}

fn flat_record(record: &LogRecord) -> FlatRecord {
    let mut fields: HashMap<String, FieldValue> = record
        .data
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    // Context overwrites data on key collision, mirroring the merge order.
    for (key, value) in record.context.iter() {
        fields.insert(key.clone(), value.clone());
    }

    FlatRecord {
        timestamp: record.timestamp_iso8601(),
        level: record.level,
        message: record.message.clone(),
        fields,
    }
}

/// `"{LEVEL}: {message} {JSON of merged data+context}"`
fn sdk_line(record: &LogRecord) -> String {
    let mut merged = record.data.clone();
    merged.merge(&record.context);
    let json = serde_json::Value::Object(merged.to_json_object());
    format!("{}: {} {}", record.level.to_str(), record.message, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> LogRecord {
        LogRecord::new(
            Severity::Warn,
            "disk low",
            Fields::new().with_field("a", 1),
            Fields::new().with_field("b", 2),
        )
    }

    #[test]
    fn test_console_shape_is_flat() {
        let payload = default_format(Destination::Console, &record());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["level"], "WARN");
        assert_eq!(json["message"], "disk low");
        // Data and context appear as top-level keys.
        assert_eq!(json["a"], 1);
        assert_eq!(json["b"], 2);
        assert!(json.get("data").is_none());
        assert!(json.get("context").is_none());
    }

    #[test]
    fn test_console_context_wins_on_collision() {
        let record = LogRecord::new(
            Severity::Info,
            "m",
            Fields::new().with_field("env", "from_data"),
            Fields::new().with_field("env", "from_context"),
        );
        let json = serde_json::to_value(default_format(Destination::Console, &record)).unwrap();
        assert_eq!(json["env"], "from_context");
    }

    #[test]
    fn test_remote_and_file_shapes_stay_nested() {
        for destination in [Destination::HttpRemote, Destination::FileSink] {
            let payload = default_format(destination, &record());
            let json = serde_json::to_value(&payload).unwrap();

            assert_eq!(json["data"]["a"], 1);
            assert_eq!(json["context"]["b"], 2);
            // Never flattened.
            assert!(json.get("a").is_none());
            assert!(json.get("b").is_none());
        }
    }

    #[test]
    fn test_sdk_line_format() {
        let record = LogRecord::new(
            Severity::Error,
            "boom",
            Fields::new().with_field("code", 500),
            Fields::new(),
        );
        let payload = default_format(Destination::CrashSdk, &record);
        match payload {
            Payload::Line(line) => {
                assert!(line.starts_with("ERROR: boom "));
                assert!(line.contains("\"code\":500"));
            }
            other => panic!("expected line payload, got {:?}", other),
        }
    }

    #[test]
    fn test_sdk_line_merges_context_over_data() {
        let record = LogRecord::new(
            Severity::Info,
            "m",
            Fields::new().with_field("k", "data"),
            Fields::new().with_field("k", "context"),
        );
        match default_format(Destination::CrashSdk, &record) {
            Payload::Line(line) => assert!(line.contains("\"k\":\"context\"")),
            other => panic!("expected line payload, got {:?}", other),
        }
    }
}
