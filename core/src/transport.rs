//! The seam between the executor and the network.
//!
//! # Design
//! `RequestExecutor` only ever talks to a `Transport`, so tests can swap in
//! a fake that records what would have been sent. `UreqTransport` is the
//! real implementation: one blocking round-trip per call, redirects
//! followed, and 4xx/5xx returned as data rather than as errors so the
//! caller sees the server's error body.

use std::io;

use log::debug;
use url::Url;
use ureq::http::uri::InvalidUri;
use ureq::http::{Request, Response};
use ureq::{Agent, Body};

use crate::error::SendError;
use crate::http::{HeaderEntry, OutgoingRequest, RawResponse};

/// Performs one HTTP round-trip.
pub trait Transport {
    fn execute(&self, request: OutgoingRequest) -> Result<RawResponse, SendError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: OutgoingRequest) -> Result<RawResponse, SendError> {
        (**self).execute(request)
    }
}

/// Redirect hops followed before giving up.
pub const DEFAULT_MAX_REDIRECTS: u32 = 10;

/// Blocking transport backed by a `ureq` agent.
///
/// ureq's own default headers (user agent, `Accept`) are still sent; the
/// assembled headers are appended alongside them.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_max_redirects(DEFAULT_MAX_REDIRECTS)
    }

    /// A transport that follows at most `max_redirects` hops. Zero disables
    /// redirect following.
    pub fn with_max_redirects(max_redirects: u32) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(max_redirects)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: OutgoingRequest) -> Result<RawResponse, SendError> {
        debug!("{} {}", request.method, request.url);
        resolve_host(&request.url)?;

        let mut builder = Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let invalid = |e: ureq::http::Error| {
            if e.is::<InvalidUri>() {
                SendError::malformed_url(&request.url, e)
            } else {
                SendError::Transport(format!("invalid request: {e}"))
            }
        };
        let result = match &request.body {
            Some(body) => self.agent.run(builder.body(body.as_bytes()).map_err(invalid)?),
            None => self.agent.run(builder.body(()).map_err(invalid)?),
        };

        let response = result.map_err(|e| map_error(&request.url, e))?;
        Ok(into_raw(response))
    }
}

fn into_raw(response: Response<Body>) -> RawResponse {
    let status = response.status();
    let status_line = format!(
        "{:?} {} {}",
        response.version(),
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    );

    let mut headers = vec![HeaderEntry::status_line(status_line.trim_end())];
    for name in response.headers().keys() {
        let values = response
            .headers()
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect();
        headers.push(HeaderEntry {
            name: Some(name.as_str().to_string()),
            values,
        });
    }

    RawResponse {
        status: status.as_u16(),
        headers,
        body: Box::new(response.into_body().into_reader()),
    }
}

/// Look the host up before dispatch so resolver failures surface as
/// `ConnectionFailed`; ureq reports them as uncategorized I/O errors.
///
/// URLs without a host or a known port are left for ureq to reject.
fn resolve_host(url: &str) -> Result<(), SendError> {
    let Ok(parsed) = Url::parse(url) else {
        return Ok(());
    };
    let Some(host) = parsed.host_str() else {
        return Ok(());
    };
    if parsed.port_or_known_default().is_none() {
        return Ok(());
    }
    match parsed.socket_addrs(|| None) {
        Ok(addrs) if !addrs.is_empty() => Ok(()),
        Ok(_) => Err(SendError::ConnectionFailed(format!("host not found: {host}"))),
        Err(e) => Err(SendError::ConnectionFailed(format!("cannot resolve {host}: {e}"))),
    }
}

fn map_error(url: &str, err: ureq::Error) -> SendError {
    match err {
        ureq::Error::BadUri(reason) => SendError::malformed_url(url, reason),
        ureq::Error::HostNotFound => SendError::ConnectionFailed(format!("host not found: {url}")),
        ureq::Error::ConnectionFailed => SendError::ConnectionFailed(format!("could not connect to {url}")),
        ureq::Error::Io(e) if is_connect_error(&e) => SendError::ConnectionFailed(e.to_string()),
        ureq::Error::Io(e) => SendError::Io(e),
        other => SendError::Transport(other.to_string()),
    }
}

fn is_connect_error(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::ConnectionRefused | io::ErrorKind::AddrNotAvailable | io::ErrorKind::NotFound
    )
}
