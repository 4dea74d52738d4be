//! # Theme Error Types
//!
//! Errors raised by preference storage and theme configuration. Most callers
//! never see them: [Preferences](crate::preference::Preferences) logs and
//! swallows them so that the UI always has a theme to render.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the theming layer.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// A persisted or configured value is not a known theme mode.
    #[error("Unknown theme mode '{value}'")]
    InvalidMode {
        /// The rejected value.
        value: String,
    },

    /// The preference file exists but could not be parsed.
    #[error("Failed to parse preference file {path:?}: {details}")]
    ParseError {
        /// The path of the file that failed to parse.
        path: PathBuf,
        /// Details about the parse error.
        details: String,
    },

    /// The preference store refused the operation (disabled, full, ...).
    #[error("Preference storage unavailable: {reason}")]
    StorageUnavailable {
        /// Why the store is unavailable.
        reason: String,
    },

    /// The preference directory could not be determined.
    #[error("Failed to locate preference directory: {source}")]
    Location {
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error serializing preference data.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

impl ThemeError {
    /// Create an invalid mode error.
    pub fn invalid_mode(value: impl Into<String>) -> Self {
        Self::InvalidMode {
            value: value.into(),
        }
    }

    /// Create a preference file parse error.
    pub fn parse_error(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            details: details.into(),
        }
    }

    /// Create a storage unavailable error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a location error from any error type.
    pub fn location(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Location {
            source: Box::new(source),
        }
    }
}
