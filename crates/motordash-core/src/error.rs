//! Error types for MOTORDASH operations.
//!
//! This module defines [`DashError`], the error enum covering all fallible
//! paths in the MOTORDASH system. Errors are designed for visibility - no
//! silent failures, clear actionable messages.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`DashError`].
pub type Result<T> = std::result::Result<T, DashError>;

/// Error type for all MOTORDASH operations.
#[derive(Debug, Error)]
pub enum DashError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration file could not be read
    #[error("Failed to read configuration at {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is invalid YAML
    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String },

    // =========================================================================
    // I/O Errors
    // =========================================================================
    /// Generic I/O error with context
    #[error("I/O error {operation}: {path}")]
    Io {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory creation failed
    #[error("Failed to create directory: {path}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Serialization Errors
    // =========================================================================
    /// JSON serialization error (alert export)
    #[error("JSON error in {context}: {message}")]
    Json {
        context: String,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // =========================================================================
    // Terminal Errors
    // =========================================================================
    /// Terminal setup or restore failed
    #[error("Terminal error: {message}")]
    Terminal {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// Internal invariant violation or unexpected state
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DashError {
    /// Create a config validation error.
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an I/O error with operation context.
    pub fn io(operation: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config_validation() {
        let err = DashError::config_validation("dwell_ms must be non-zero");
        assert_eq!(
            err.to_string(),
            "Configuration validation failed: dwell_ms must be non-zero"
        );
    }

    #[test]
    fn test_error_display_io() {
        let err = DashError::io(
            "reading",
            "/tmp/motordash.yaml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "I/O error reading: /tmp/motordash.yaml");
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let err = DashError::io(
            "reading",
            "/tmp/x",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.source().is_some());

        let err = DashError::internal("oops");
        assert!(err.source().is_none());
    }
}
