//! Severity level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Log severity, totally ordered by numeric rank.
///
/// `Severity::None` is a sentinel that ranks above every real level. It is
/// only meaningful as a minimum-level setting, where it silences all output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    Crash = 4,
    None = 5,
}

impl Severity {
    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Crash => "CRASH",
            Severity::None => "NONE",
        }
    }

    /// Numeric rank used by the minimum-level filter.
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// True for levels that route to the console's error stream.
    pub fn is_error_stream(&self) -> bool {
        matches!(self, Severity::Error | Severity::Crash)
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Debug => Blue,
            Severity::Info => Green,
            Severity::Warn => Yellow,
            Severity::Error => Red,
            Severity::Crash => BrightRed,
            Severity::None => BrightBlack,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARN" | "WARNING" => Ok(Severity::Warn),
            "ERROR" => Ok(Severity::Error),
            "CRASH" => Ok(Severity::Crash),
            "NONE" => Ok(Severity::None),
            _ => Err(format!("Invalid severity: '{}'", s)),
        }
    }
}
