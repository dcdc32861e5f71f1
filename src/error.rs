//! Error types for the dropbox_lite crate.

use thiserror::Error;

/// Errors that can occur when talking to the Dropbox API.
#[derive(Error, Debug)]
pub enum DropboxError {
    /// A required piece of configuration was never set on the client.
    #[error("client is not configured: missing {0}")]
    NotConfigured(&'static str),

    /// Network, DNS, or connection-level failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API rejected the access token (HTTP 401).
    #[error("invalid_access_token")]
    Unauthorized,

    /// The response body did not match the expected JSON shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Any other non-2xx status, with the summary reported by Dropbox
    /// or the raw body when no `error_summary` field was present.
    #[error("API error ({status}): {summary}")]
    Api { status: u16, summary: String },
}

impl DropboxError {
    /// HTTP-status classification of the error.
    ///
    /// Transport failures classify as 400, decode failures as 503;
    /// `NotConfigured` never reached the wire and has no status.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            DropboxError::NotConfigured(_) => None,
            DropboxError::Transport(_) => Some(400),
            DropboxError::Unauthorized => Some(401),
            DropboxError::Decode(_) => Some(503),
            DropboxError::Api { status, .. } => Some(*status),
        }
    }
}

/// Result type alias for DropboxError.
pub type Result<T> = std::result::Result<T, DropboxError>;
