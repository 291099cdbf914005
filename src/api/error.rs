//! Error types for backend requests.

use crate::validation::ValidationError;

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Everything that can go wrong between a view and the backend.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Connection, TLS, timeout or body read failure.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status. `message` is the server's text when it sent
    /// one, otherwise a generic fallback.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Success status but the body did not match the expected shape.
    #[error("invalid response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Endpoint could not be joined onto the base URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Input rejected client-side, no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Operation needs a session and none is present.
    #[error("not signed in, run `cabinet login` first")]
    Unauthenticated,

    /// Operation needs the admin role.
    #[error("this action requires an administrator account")]
    Forbidden,

    /// Local file error around uploads and downloads.
    #[error("IO error in {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a status error.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// HTTP status returned by the backend, if the request got that far.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for rejections that never left the machine.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
