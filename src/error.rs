//! Unified error hierarchy for vitalog
//!
//! The stats engine itself never fails on data shape - missing numeric
//! inputs degrade to sentinels. Errors here belong to the surface around
//! it: store lookups, record import, configuration and IO.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all vitalog operations
#[derive(Debug, Error)]
pub enum VitalogError {
    /// No profile stored for the requested user
    #[error("Profile not found for user: {user}")]
    ProfileNotFound { user: String },

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record import/export errors
    #[error("Import/Export error: {0}")]
    ImportExport(#[from] ImportExportError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Record import and export errors
#[derive(Debug, Error)]
pub enum ImportExportError {
    /// Unsupported file format
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// Format-specific parsing error
    #[error("Parse error in {format}: {reason}")]
    ParseError { format: String, reason: String },

    /// Missing required field in an imported record
    #[error("Missing required data: {field}")]
    MissingData { field: String },

    /// Export failed
    #[error("Export failed to {path}: {reason}")]
    ExportFailed { path: PathBuf, reason: String },
}

/// Result type alias for vitalog operations
pub type Result<T> = std::result::Result<T, VitalogError>;

impl VitalogError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            VitalogError::ProfileNotFound { .. } => ErrorSeverity::Warning,
            VitalogError::Validation(_) => ErrorSeverity::Warning,
            VitalogError::ImportExport(_) => ErrorSeverity::Error,
            VitalogError::Configuration(_) => ErrorSeverity::Error,
            VitalogError::Io(_) => ErrorSeverity::Error,
            VitalogError::Internal(_) => ErrorSeverity::Critical,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            VitalogError::ProfileNotFound { user } => {
                format!("No profile found for '{}'. Create one before computing health stats.", user)
            }
            VitalogError::ImportExport(ImportExportError::UnsupportedFormat { format }) => {
                format!("'{}' files are not supported. Use JSON or CSV.", format)
            }
            VitalogError::Configuration(reason) => {
                format!("Configuration problem: {}. Check your config file.", reason)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}
