//! Core of a small REST client: compose an HTTP request, send it, and get
//! back the raw response (headers, then body) as one block of text.
//!
//! # Overview
//! `RequestExecutor::send` turns an `HttpRequest` into an `OutgoingRequest`,
//! dispatches it through a `Transport`, and renders the `RawResponse` as
//! text. The default transport is a blocking `ureq` agent; tests plug in
//! recording fakes.
//!
//! # Design
//! - The executor is stateless; every call opens, uses, and releases its
//!   own connection and streams.
//! - Calls block. Run them off the UI thread to stay responsive. There is
//!   no timeout and no cancellation.
//! - The response charset is sniffed from the first `=` of `Content-Type`
//!   (see `charset`).
//! - `form` holds the helpers the request form needs around the executor.

pub mod charset;
pub mod error;
pub mod executor;
pub mod form;
pub mod http;
pub mod stream;
pub mod transport;

pub use error::SendError;
pub use executor::RequestExecutor;
pub use http::{HeaderEntry, HttpMethod, HttpRequest, OutgoingRequest, RawResponse};
pub use transport::{Transport, UreqTransport};

/// Send one request over the default transport.
///
/// `method` must be one of GET, POST, PUT, DELETE, HEAD, OPTIONS or TRACE.
/// `body` is only transmitted for POST and PUT.
pub fn send(
    url: &str,
    method: &str,
    content_type: &str,
    accept_type: &str,
    headers: &[(String, String)],
    body: &str,
) -> Result<String, SendError> {
    let request = HttpRequest {
        url: url.to_string(),
        method: method.parse()?,
        content_type: content_type.to_string(),
        accept_type: accept_type.to_string(),
        headers: headers.to_vec(),
        body: Some(body.to_string()),
    };
    RequestExecutor::<UreqTransport>::default().send(&request)
}
