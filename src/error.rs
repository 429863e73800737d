// src/error.rs
//! Error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the converter.
//! Parsing failures are scoped to a single document; the batch layer turns
//! them into a `FailureCategory` so one bad record never aborts a run.

use std::fmt;
use thiserror::Error;

/// Why a single raw document could not be turned into a `Document`.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{object} is missing required field '{field}'")]
    MissingField {
        object: &'static str,
        field: &'static str,
    },

    #[error("{object} field '{field}' holds an unparsable timestamp '{value}': {source}")]
    MalformedTimestamp {
        object: &'static str,
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("{object} is not shaped as expected: {reason}")]
    InvalidShape {
        object: &'static str,
        reason: String,
    },
}

impl ParseError {
    /// The reporting category for this failure.
    pub fn category(&self) -> FailureCategory {
        match self {
            Self::MissingField { .. } => FailureCategory::MissingField,
            Self::MalformedTimestamp { .. } => FailureCategory::MalformedTimestamp,
            Self::InvalidShape { .. } => FailureCategory::InvalidShape,
        }
    }
}

/// Operator-facing cause category for a failed document.
///
/// This is what a batch run reports next to the offending identifier,
/// instead of a raw error chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    MalformedTimestamp,
    MissingField,
    InvalidShape,
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTimestamp => write!(f, "malformed_timestamp"),
            Self::MissingField => write!(f, "missing_field"),
            Self::InvalidShape => write!(f, "invalid_shape"),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON decode error for {path}: {source}")]
    JsonDecode {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },

    #[error("JSON encode error: {0}")]
    JsonEncode(#[from] serde_json::Error),

    #[error("Output delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_variants() {
        let missing = ParseError::MissingField {
            object: "page",
            field: "id",
        };
        assert_eq!(missing.category(), FailureCategory::MissingField);
        assert_eq!(missing.category().to_string(), "missing_field");

        let source = chrono::DateTime::parse_from_rfc3339("yesterday").unwrap_err();
        let timestamp = ParseError::MalformedTimestamp {
            object: "block",
            field: "created_time",
            value: "yesterday".to_string(),
            source,
        };
        assert_eq!(timestamp.category(), FailureCategory::MalformedTimestamp);
        assert!(timestamp.to_string().contains("'yesterday'"));
    }
}
