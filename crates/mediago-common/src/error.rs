//! Common error types used throughout mediago.
//!
//! Every failure the video and asset layers can produce is one of these
//! variants. The HTTP layer maps them to a status code and a JSON body.

use std::path::PathBuf;

/// Rejection reasons for a client-supplied stream path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The path contains a traversal token.
    #[error("Invalid file path")]
    BadRequest,

    /// The path could not be resolved or does not name a file.
    #[error("File not found")]
    NotFound,
}

/// Common error type for mediago.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The media root is unset or does not exist.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Walking the media root failed.
    #[error("Failed to scan video directory {path:?}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stream path was rejected.
    #[error(transparent)]
    Path(#[from] PathError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new Config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new Scan error for the given root.
    pub fn scan(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Scan {
            path: path.into(),
            source,
        }
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Path(PathError::BadRequest) => 400,
            Self::Path(PathError::NotFound) => 404,
            Self::Config(_) | Self::Scan { .. } | Self::Internal(_) => 500,
        }
    }

    /// Short machine-readable name for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::Scan { .. } => "scan_error",
            Self::Path(PathError::BadRequest) => "bad_request",
            Self::Path(PathError::NotFound) => "not_found",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Message safe to show to API clients.
    ///
    /// Scan failures carry host paths and OS error text, so clients only see
    /// a fixed message; the detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::Scan { .. } => "Failed to retrieve video files".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
