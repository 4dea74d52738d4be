use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while talking to the backend or loading settings.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The request could not be sent or the response not decoded.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Backend returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// A URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The API base URL cannot have path segments appended.
    #[error("Invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    /// A settings file could not be understood.
    #[error("Invalid settings in {path:?}: {details}")]
    Config {
        /// File that failed.
        path: PathBuf,
        /// What went wrong.
        details: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The operation needs a session token and none is set.
    #[error("Not signed in")]
    NotAuthenticated,
}

impl ServiceError {
    /// Create a new settings error.
    pub fn config(path: impl AsRef<Path>, details: impl ToString) -> Self {
        Self::Config {
            path: path.as_ref().to_path_buf(),
            details: details.to_string(),
        }
    }

    /// HTTP status of a [ServiceError::Status] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// A message suitable for showing to the user.
    ///
    /// For backend errors this is the `error` or `message` field of a JSON
    /// body when present, otherwise the error's display text.
    pub fn user_message(&self) -> String {
        if let Self::Status { body, .. } = self {
            if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str::<serde_json::Value>(body) {
                for key in ["error", "message"] {
                    if let Some(serde_json::Value::String(message)) = fields.get(key) {
                        return message.clone();
                    }
                }
            }
        }
        self.to_string()
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
