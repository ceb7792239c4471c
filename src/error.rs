//! Error types for wsdl-builder
//!
//! Builders fail fast: a call that breaks a local rule (an `<all>` particle
//! with the wrong cardinality, an unknown `processContents` value, a fault
//! action registered before its operation action) returns an error right
//! away. Everything else, including duplicate names and dangling references,
//! is accepted and serialized as given.

use thiserror::Error;

/// Result type alias using wsdl-builder Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wsdl-builder operations
#[derive(Error, Debug)]
pub enum Error {
    /// An argument violates a schema construction rule
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A call was made before its precondition was met
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// XML serialization error
    #[error("XML error: {0}")]
    Xml(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error while reading a service manifest
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A manifest is structurally unusable
    #[error("manifest error: {0}")]
    Manifest(String),
}

impl Error {
    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Create an invalid-operation error
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Error::InvalidOperation(message.into())
    }

    /// The bare message without the category prefix
    pub fn message(&self) -> String {
        match self {
            Error::InvalidArgument(msg)
            | Error::InvalidOperation(msg)
            | Error::Xml(msg)
            | Error::Manifest(msg) => msg.clone(),
            Error::Io(e) => e.to_string(),
            Error::Json(e) => e.to_string(),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Error::Xml(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = Error::invalid_argument("processContents must be one of: strict, lax, skip");
        assert_eq!(
            err.to_string(),
            "invalid argument: processContents must be one of: strict, lax, skip"
        );
        assert_eq!(
            err.message(),
            "processContents must be one of: strict, lax, skip"
        );
    }

    #[test]
    fn test_invalid_operation_display() {
        let err = Error::invalid_operation("No action defined for operation 'Op'. Call action() first.");
        let msg = format!("{}", err);
        assert!(msg.starts_with("invalid operation:"));
        assert!(msg.contains("Call action() first."));
    }

    #[test]
    fn test_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
