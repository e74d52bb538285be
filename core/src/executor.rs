//! Sends one request and renders the response as text.
//!
//! # Design
//! `RequestExecutor` holds nothing but its transport and carries no mutable
//! state between calls, so concurrent callers never share anything beyond
//! that transport. Each `send` is a single linear pass:
//! sanitize the URL, assemble headers, dispatch, render the header block,
//! sniff the charset, drain and decode the body.
//!
//! The returned text is the header block (one `name = [values]` line per
//! response header, the status line without a name) followed by two blank
//! lines and the decoded body. For non-2xx statuses the body is the error
//! body sent by the server.

use log::debug;
use url::Url;

use crate::charset::{self, DEFAULT_CHARSET};
use crate::error::SendError;
use crate::http::{HeaderEntry, HttpRequest, OutgoingRequest};
use crate::stream;
use crate::transport::{Transport, UreqTransport};

/// Stateless request executor over a `Transport`.
#[derive(Debug, Clone, Default)]
pub struct RequestExecutor<T = UreqTransport> {
    transport: T,
}

impl<T: Transport> RequestExecutor<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn send(&self, request: &HttpRequest) -> Result<String, SendError> {
        let url = sanitize_url(&request.url);
        Url::parse(&url).map_err(|e| SendError::malformed_url(&url, e))?;

        let outgoing = OutgoingRequest {
            method: request.method,
            url,
            headers: assemble_headers(request),
            body: request
                .body
                .clone()
                .filter(|_| request.method.carries_body()),
        };
        let response = self.transport.execute(outgoing)?;

        let mut result = format_header_block(&response.headers);
        let charset = charset::detect_charset(&response.headers);
        if !response.is_success() {
            debug!("status {}, reading error body", response.status);
        }
        let bytes = stream::drain(response.body)?;
        result.push_str(&charset::decode(&bytes, &charset));
        Ok(result)
    }
}

/// Replace every space with `%20`. Nothing else is encoded.
pub fn sanitize_url(url: &str) -> String {
    url.replace(' ', "%20")
}

/// Request headers in send order: the three fixed headers, then the
/// caller's headers as given.
pub fn assemble_headers(request: &HttpRequest) -> Vec<(String, String)> {
    let mut headers = vec![
        ("Accept-Content".to_string(), request.accept_type.clone()),
        ("Accept-Charset".to_string(), DEFAULT_CHARSET.to_string()),
        (
            "Content-Type".to_string(),
            format!("{}; charset={DEFAULT_CHARSET}", request.content_type),
        ),
    ];
    headers.extend(request.headers.iter().cloned());
    headers
}

/// Render response headers as text, terminated by the blank-line separator.
pub fn format_header_block(headers: &[HeaderEntry]) -> String {
    let mut block = String::new();
    for entry in headers {
        let values = format!("[{}]", entry.values.join(", "));
        let line = match &entry.name {
            Some(name) => format!("{name} = {values}"),
            None => values,
        };
        debug!("{line}");
        block.push_str(&line);
        block.push('\n');
    }
    block.push_str("\n\n");
    block
}
