//! Error type for the request executor.
//!
//! # Design
//! Every failure is surfaced to the caller as a `SendError`; nothing is
//! retried or recovered inside the core. The caller decides how to render
//! the error (the response pane simply shows its `Display` text).

use thiserror::Error;

/// Errors returned by `RequestExecutor::send` and the transports behind it.
#[derive(Debug, Error)]
pub enum SendError {
    /// The method string is not one of GET/POST/PUT/DELETE/HEAD/OPTIONS/TRACE.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// The URL could not be parsed, even after space sanitization.
    #[error("malformed URL {url:?}: {reason}")]
    MalformedUrl { url: String, reason: String },

    /// The host could not be resolved or the connection was refused.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Writing the request body or reading the response failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other failure reported by the transport.
    #[error("transport error: {0}")]
    Transport(String),
}

impl SendError {
    pub(crate) fn malformed_url(url: &str, reason: impl ToString) -> Self {
        SendError::MalformedUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
