//! Error types for pbm-bindings
//!
//! This module defines all error types used throughout the library.
//! Remote faults carried by the schema itself live in [`crate::faults`];
//! they convert into [`Error::Fault`] when a caller wants a single error type.

use std::fmt;
use thiserror::Error;

use crate::faults::FaultException;

/// Result type alias using the pbm Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pbm operations
#[derive(Error, Debug)]
pub enum Error {
    /// XML content did not match the expected schema shape
    #[error("decoding error: {0}")]
    Decode(#[from] DecodeError),

    /// Token outside the closed set of an enumeration
    #[error("unrecognized enumeration value '{value}' for {type_name}")]
    UnknownEnumValue {
        /// Schema name of the enumeration
        type_name: &'static str,
        /// The offending token
        value: String,
    },

    /// `xsi:type` or registry name that is not part of the expected family
    #[error("unknown type '{found}' where {expected} was expected")]
    UnknownType {
        /// Schema name of the expected base type
        expected: &'static str,
        /// The name that was found
        found: String,
    },

    /// Encoding error (data to XML conversion)
    #[error("encoding error: {0}")]
    Encode(String),

    /// Name error (invalid XML name)
    #[error("name error: {0}")]
    Name(String),

    /// Namespace error
    #[error("namespace error: {0}")]
    Namespace(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// I/O error reading or writing documents
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON bridge error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Remote fault carried in a response
    #[error(transparent)]
    Fault(#[from] Box<FaultException>),
}

impl Error {
    /// Prefix the element path of a decoding error with `segment`.
    ///
    /// Other error kinds pass through unchanged.
    pub fn within(self, segment: &str) -> Self {
        match self {
            Error::Decode(err) => Error::Decode(err.within(segment)),
            other => other,
        }
    }
}

impl From<FaultException> for Error {
    fn from(fault: FaultException) -> Self {
        Error::Fault(Box::new(fault))
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

/// Decoding error with the element path it was raised at
#[derive(Debug, Clone)]
pub struct DecodeError {
    /// Error message
    pub message: String,
    /// Path of the element, outermost first (`profileId/uniqueId`)
    pub path: Option<String>,
    /// Schema type being decoded when the error was raised
    pub type_name: Option<String>,
}

impl DecodeError {
    /// Create a new decoding error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            type_name: None,
        }
    }

    /// Error for a required child element that is absent
    pub fn missing(parent: &str, name: &str) -> Self {
        Self::new(format!("missing required element '{}' in '{}'", name, parent))
    }

    /// Set the path where decoding failed
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the schema type
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Prepend a path segment
    pub fn within(mut self, segment: &str) -> Self {
        self.path = Some(match self.path.take() {
            Some(rest) => format!("{}/{}", segment, rest),
            None => segment.to_string(),
        });
        self
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref type_name) = self.type_name {
            write!(f, " (type {})", type_name)?;
        }

        if let Some(ref path) = self.path {
            write!(f, " at {}", path)?;
        }

        Ok(())
    }
}

impl std::error::Error for DecodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::new("bad value")
            .with_type_name("PbmProfileId")
            .with_path("profileId/uniqueId");

        let msg = format!("{}", err);
        assert!(msg.contains("bad value"));
        assert!(msg.contains("PbmProfileId"));
        assert!(msg.contains("profileId/uniqueId"));
    }

    #[test]
    fn test_within_builds_path_outermost_first() {
        let err: Error = DecodeError::missing("PbmProfileId", "uniqueId").into();
        let err = err.within("profileId").within("returnval");

        match err {
            Error::Decode(d) => assert_eq!(d.path.as_deref(), Some("returnval/profileId")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_within_leaves_other_errors() {
        let err = Error::Namespace("x".into()).within("a");
        assert!(matches!(err, Error::Namespace(_)));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "I/O error: no such file");
    }

    #[test]
    fn test_unknown_enum_value_message() {
        let err = Error::UnknownEnumValue {
            type_name: "PbmVvolType",
            value: "Disk".into(),
        };
        assert_eq!(
            err.to_string(),
            "unrecognized enumeration value 'Disk' for PbmVvolType"
        );
    }
}
