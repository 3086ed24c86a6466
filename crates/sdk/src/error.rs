//! Error types for the Trello SDK.

/// Result type for SDK operations.
pub type TrelloResult<T> = Result<T, TrelloError>;

/// Longest response excerpt kept in a [`TrelloError::RemoteFormat`].
const BODY_EXCERPT_LEN: usize = 512;

/// Error types that can occur when talking to the Trello API.
#[derive(Debug, thiserror::Error)]
pub enum TrelloError {
    /// The request could not be completed (connection, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The response body was not valid JSON.
    #[error("Invalid JSON response (status {status}): {body}")]
    RemoteFormat { status: u16, body: String },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error while encoding a request body.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A path segment that cannot be sent as-is (empty, `.` or `..`).
    #[error("Invalid path segment: {0:?}")]
    InvalidPathSegment(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl TrelloError {
    /// Classify a reqwest failure, splitting timeouts out of the generic case.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }

    /// Build a format error from a response body that failed to parse.
    pub fn remote_format(status: u16, body: &str) -> Self {
        let mut excerpt: String = body.chars().take(BODY_EXCERPT_LEN).collect();
        if excerpt.len() < body.len() {
            excerpt.push_str("...");
        }
        Self::RemoteFormat {
            status,
            body: excerpt,
        }
    }

    /// True for failures of the transport itself rather than of the payload.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Timeout)
    }
}
