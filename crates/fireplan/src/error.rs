//! Error types for fireplan.
//!
//! This module defines all error types used throughout the fireplan crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for fireplan operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Geometry Errors ===
    /// The floor outline cannot be turned into a usable polygon.
    #[error("invalid floor outline: {message}")]
    InvalidGeometry {
        /// Description of what is wrong with the outline.
        message: String,
    },

    /// An operation on the drawing sketch was rejected.
    #[error("sketch error: {0}")]
    Sketch(String),

    // === Analysis Errors ===
    /// An analysis input is out of range.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The design violates a hard NFPA 10 rule that no extinguisher choice can fix.
    #[error("code violation: {rule}")]
    CodeViolation {
        /// The rule that was violated.
        rule: String,
    },

    /// The requested placement option does not exist.
    #[error("option {requested} does not exist ({available} available)")]
    OptionOutOfRange {
        /// The 1-based option number that was requested.
        requested: usize,
        /// Number of options generated.
        available: usize,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Project Errors ===
    /// A project file could not be parsed.
    #[error("failed to parse project {path}: {message}")]
    ProjectParse {
        /// Path to the project file.
        path: PathBuf,
        /// Description of what went wrong.
        message: String,
    },

    /// Refused to overwrite an existing file.
    #[error("file already exists: {path}")]
    AlreadyExists {
        /// Path that already exists.
        path: PathBuf,
    },

    // === Report Errors ===
    /// Report rendering failed.
    #[error("failed to render report: {0}")]
    Template(#[from] tera::Error),

    // === Update Errors ===
    /// The update check failed.
    #[error("update check failed: {0}")]
    UpdateCheck(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization failed.
    #[error("TOML error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// A specialized Result type for fireplan operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new invalid geometry error.
    #[must_use]
    pub fn invalid_geometry(message: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            message: message.into(),
        }
    }

    /// Create a new sketch error.
    #[must_use]
    pub fn sketch(message: impl Into<String>) -> Self {
        Self::Sketch(message.into())
    }

    /// Create a new invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a code violation error.
    #[must_use]
    pub fn code_violation(rule: impl Into<String>) -> Self {
        Self::CodeViolation { rule: rule.into() }
    }

    /// Create a new update check error.
    #[must_use]
    pub fn update_check(message: impl Into<String>) -> Self {
        Self::UpdateCheck(message.into())
    }

    /// Check if this error is a hard code violation.
    #[must_use]
    pub fn is_code_violation(&self) -> bool {
        matches!(self, Self::CodeViolation { .. })
    }

    /// Check if this error comes from bad user geometry.
    #[must_use]
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Self::InvalidGeometry { .. } | Self::Sketch(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_geometry("fewer than 3 vertices");
        assert_eq!(
            err.to_string(),
            "invalid floor outline: fewer than 3 vertices"
        );

        let err = Error::invalid_input("safety factor 2 out of range");
        assert_eq!(err.to_string(), "invalid input: safety factor 2 out of range");
    }

    #[test]
    fn test_error_is_code_violation() {
        assert!(Error::code_violation("too deep").is_code_violation());
        assert!(!Error::invalid_input("x").is_code_violation());
    }

    #[test]
    fn test_error_is_geometry_error() {
        assert!(Error::invalid_geometry("x").is_geometry_error());
        assert!(Error::sketch("closed").is_geometry_error());
        assert!(!Error::invalid_input("x").is_geometry_error());
    }

    #[test]
    fn test_option_out_of_range_display() {
        let err = Error::OptionOutOfRange {
            requested: 5,
            available: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains("3 available"));
    }

    #[test]
    fn test_update_check_error() {
        let err = Error::update_check("connection refused");
        assert_eq!(err.to_string(), "update check failed: connection refused");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_project_parse_error_display() {
        let err = Error::ProjectParse {
            path: PathBuf::from("/tmp/plan.toml"),
            message: "missing field `outline`".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/plan.toml"));
        assert!(msg.contains("outline"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "grid_scale out of range".to_string(),
        };
        assert!(err.to_string().contains("grid_scale"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
