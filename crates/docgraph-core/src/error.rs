//! Error types for docgraph.
//!
//! All fallible operations in the workspace return [`Error`]. The graph
//! builder, metrics and filter are infallible and never produce one.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for docgraph operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Invalid file path (not a directory, outside the scan root, etc.)
    #[error("Invalid file path: {reason}")]
    InvalidPath { reason: String },

    /// Parse error
    #[error("Parse error: {reason}")]
    ParseError { reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Validation error
    #[error("Validation error: {reason}")]
    ValidationError { reason: String },

    /// No metadata template with this id
    #[error("Template not found: {id}")]
    TemplateNotFound { id: String },

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error
    pub fn io(err: io::Error) -> Self {
        Error::Io(err)
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Error::FileNotFound { path: path.into() }
    }

    /// Create an invalid path error
    pub fn invalid_path(reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            reason: reason.into(),
        }
    }

    /// Create a parse error
    pub fn parse_error(reason: impl Into<String>) -> Self {
        Error::ParseError {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a validation error
    pub fn validation_error(reason: impl Into<String>) -> Self {
        Error::ValidationError {
            reason: reason.into(),
        }
    }

    /// Create a template not found error
    pub fn template_not_found(id: impl Into<String>) -> Self {
        Error::TemplateNotFound { id: id.into() }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::parse_error(format!("YAML: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::file_not_found("/docs/missing.md");
        assert!(err.to_string().contains("File not found"));

        let err = Error::invalid_path("not a directory");
        assert!(err.to_string().contains("Invalid file path"));

        let err = Error::template_not_found("cookbook");
        assert_eq!(err.to_string(), "Template not found: cookbook");
    }

    #[test]
    fn test_yaml_error_maps_to_parse_error() {
        let yaml_err = serde_yaml::from_str::<serde_json::Value>("key: [unclosed").unwrap_err();
        let err: Error = yaml_err.into();
        assert!(matches!(err, Error::ParseError { .. }));
    }
}
