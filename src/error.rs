//! Construction-time errors.
//!
//! Per-frame operations never fail: out-of-range terrain lookups are clamped
//! and every random branch resolves to a terrain regime. Only building a
//! session from a bad configuration is rejected.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum LanderError {
    /// A configuration value is outside its allowed range.
    InvalidConfiguration { field: &'static str, reason: String },
    /// A JSON configuration document could not be parsed.
    ConfigParse { message: String },
}

impl LanderError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for LanderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { field, reason } => {
                write!(f, "invalid configuration: {field} {reason}")
            }
            Self::ConfigParse { message } => write!(f, "failed to parse configuration: {message}"),
        }
    }
}

impl std::error::Error for LanderError {}

impl From<serde_json::Error> for LanderError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse {
            message: err.to_string(),
        }
    }
}
