//! Upstream reply and error definitions.

use axum::body::Bytes;
use axum::http::StatusCode;
use thiserror::Error;

/// Content type assumed when an upstream omits one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// A 2xx answer from an upstream, fully read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub content_type: String,
    pub body: Bytes,
}

/// Errors that can occur while forwarding a request.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The upstream answered with a non-2xx status.
    #[error("upstream returned {status}")]
    Upstream {
        status: StatusCode,
        body: Bytes,
        content_type: Option<String>,
    },

    /// No usable answer: timeout, DNS, refused connection, TLS or body read failure.
    #[error("transport error: {cause}")]
    Transport {
        #[source]
        cause: reqwest::Error,
    },
}

impl ForwardError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ForwardError::Transport { cause } if cause.is_timeout())
    }
}

impl From<reqwest::Error> for ForwardError {
    fn from(cause: reqwest::Error) -> Self {
        ForwardError::Transport { cause }
    }
}

/// Result type for forwarding operations.
pub type ForwardResult<T> = Result<T, ForwardError>;
