//! Error types for GSTAI API operations

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GstaiError {
    /// Client was constructed with an unusable configuration (empty or
    /// malformed API key, bad base URL).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input rejected before any request was sent (GSTIN shape, tax period,
    /// file size ceiling, empty identifier).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Local file argument did not resolve to a readable file.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// The service rejected the API key (HTTP 401/403).
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The requested resource does not exist (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The service reported a failure. Status is the HTTP status code;
    /// `code` is the service's own error code when the body carried one.
    #[error("Remote service error (status {status}): {message}")]
    RemoteService {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Network-level failure: connect error, broken transfer, timeout.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not valid JSON for the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GstaiError {
    /// HTTP status carried by this error, if it originated server-side.
    pub fn status(&self) -> Option<u16> {
        match self {
            GstaiError::RemoteService { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when retrying the same call might succeed (network-level
    /// failures and 5xx responses).
    pub fn is_retryable(&self) -> bool {
        match self {
            GstaiError::Transport(_) => true,
            GstaiError::RemoteService { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, GstaiError>;
