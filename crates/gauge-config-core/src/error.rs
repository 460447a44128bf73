//! Error types for gauge configuration handling
//!
//! Every failure surfaces synchronously to the caller. Schema violations map
//! onto four kinds (missing field, range, zone overlap/gap, malformed color);
//! the remaining variants cover reading and decoding documents.

use std::fmt;

use thiserror::Error;

/// What went wrong between two zones (or between a zone and the domain)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneIssue {
    /// Two zones share part of their interval
    Overlap,
    /// Part of the value domain is not covered by any zone
    Gap,
    /// Zones are not listed in ascending order of `min`
    Unordered,
    /// A zone reaches outside the declared value domain
    OutsideDomain,
}

impl fmt::Display for ZoneIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneIssue::Overlap => write!(f, "overlap"),
            ZoneIssue::Gap => write!(f, "gap"),
            ZoneIssue::Unordered => write!(f, "unordered"),
            ZoneIssue::OutsideDomain => write!(f, "outside domain"),
        }
    }
}

/// Main error type for gauge configuration operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required field was not supplied
    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    /// A value lies outside its documented bound
    #[error("Value {actual} for '{field}' is out of range (expected {expected})")]
    Range {
        field: String,
        actual: String,
        expected: String,
    },

    /// Zone intervals overlap, leave gaps, or are out of order
    #[error("Zone {kind} at '{field}': {message}")]
    Overlap {
        field: String,
        kind: ZoneIssue,
        message: String,
    },

    /// A color literal could not be parsed
    #[error("Malformed color '{value}' at '{field}': {reason}")]
    MalformedColor {
        field: String,
        value: String,
        reason: String,
    },

    /// File access or I/O error
    #[error("File error: {0}")]
    Io(String),

    /// Document could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// File extension or format name not recognised
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Encoding a configuration failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ConfigError {
    /// Create a missing field error
    pub fn missing(field: impl Into<String>) -> Self {
        ConfigError::MissingField {
            field: field.into(),
        }
    }

    /// Create a range error
    pub fn range(
        field: impl Into<String>,
        actual: impl fmt::Display,
        expected: impl Into<String>,
    ) -> Self {
        ConfigError::Range {
            field: field.into(),
            actual: actual.to_string(),
            expected: expected.into(),
        }
    }

    /// Create a zone overlap/gap error
    pub fn overlap(field: impl Into<String>, kind: ZoneIssue, message: impl Into<String>) -> Self {
        ConfigError::Overlap {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }

    /// Field path the error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::MissingField { field }
            | ConfigError::Range { field, .. }
            | ConfigError::Overlap { field, .. }
            | ConfigError::MalformedColor { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Stable short code for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::MissingField { .. } => "E_MISSING_FIELD",
            ConfigError::Range { .. } => "E_RANGE",
            ConfigError::Overlap { .. } => "E_ZONE",
            ConfigError::MalformedColor { .. } => "E_COLOR",
            ConfigError::Io(_) => "E_IO",
            ConfigError::Parse(_) => "E_PARSE",
            ConfigError::UnsupportedFormat(_) => "E_FORMAT",
            ConfigError::Serialization(_) => "E_SERIALIZE",
        }
    }

    /// Check if this error describes an invalid configuration (vs. a loading problem)
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            ConfigError::MissingField { .. }
                | ConfigError::Range { .. }
                | ConfigError::Overlap { .. }
                | ConfigError::MalformedColor { .. }
        )
    }

    /// Check if this is a user-facing error (vs internal)
    pub fn is_user_error(&self) -> bool {
        !matches!(self, ConfigError::Serialization(_))
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse(format!("YAML error: {}", err))
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(format!("TOML error: {}", err))
    }
}

/// Result type alias for gauge configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::missing("angle");
        assert_eq!(err.to_string(), "Missing required field 'angle'");

        let err = ConfigError::range("lineWidth", -0.2, "(0, 1]");
        assert_eq!(
            err.to_string(),
            "Value -0.2 for 'lineWidth' is out of range (expected (0, 1])"
        );
    }

    #[test]
    fn test_error_field_and_code() {
        let err = ConfigError::overlap("staticZones[1]", ZoneIssue::Gap, "220 to 225 uncovered");
        assert_eq!(err.field(), Some("staticZones[1]"));
        assert_eq!(err.code(), "E_ZONE");
        assert!(err.is_schema_error());

        let err = ConfigError::Io("nope".to_string());
        assert_eq!(err.field(), None);
        assert!(!err.is_schema_error());
        assert!(err.is_user_error());
    }

    #[test]
    fn test_zone_issue_display() {
        assert_eq!(ZoneIssue::Overlap.to_string(), "overlap");
        assert_eq!(ZoneIssue::OutsideDomain.to_string(), "outside domain");
    }
}
