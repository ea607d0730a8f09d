//! Error types for the logging facade
//!
//! Errors here describe why one delivery attempt failed. The dispatcher
//! contains them: a log call never surfaces an error to its caller, with the
//! single documented exception of the SDK's native user-event call.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error during a delivery attempt
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Remote endpoint could not be used
    #[error("Unusable endpoint '{url}': {reason}")]
    Endpoint { url: String, reason: String },

    /// A destination's sink rejected the payload
    #[error("Sink error ({destination}): {message}")]
    Sink {
        destination: String,
        message: String,
    },

    /// Crash/analytics SDK call failed
    #[error("Crash SDK error: {0}")]
    Sdk(String),
}

impl LoggerError {
    /// Create an endpoint error
    pub fn endpoint(url: impl Into<String>, reason: impl Into<String>) -> Self {
        LoggerError::Endpoint {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a sink error
    pub fn sink(destination: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Sink {
            destination: destination.into(),
            message: message.into(),
        }
    }

    /// Create a crash SDK error
    pub fn sdk(message: impl Into<String>) -> Self {
        LoggerError::Sdk(message.into())
    }
}
