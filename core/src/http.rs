//! Request and response types exchanged with a `Transport`.
//!
//! # Design
//! `HttpRequest` is what the caller fills in (the request form).
//! `OutgoingRequest` is what actually goes over the wire once the URL is
//! sanitized and the fixed headers are assembled. `RawResponse` is what the
//! transport hands back: status, header entries in transport order, and an
//! undrained body reader.
//!
//! All fields use owned types so values can be built in tests and moved
//! across threads without lifetime concerns.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SendError;

/// HTTP method offered by the request form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Trace,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Only POST and PUT transmit the request body.
    pub fn carries_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = SendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| SendError::UnsupportedMethod(s.to_string()))
    }
}

/// The request as composed by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub url: String,
    #[serde(default)]
    pub method: HttpMethod,
    pub content_type: String,
    pub accept_type: String,
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    #[serde(default)]
    pub body: Option<String>,
}

impl HttpRequest {
    /// A GET request for `url` that sends and accepts `application/json`.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            method: HttpMethod::Get,
            content_type: "application/json".to_string(),
            accept_type: "application/json".to_string(),
            headers: Vec::new(),
            body: None,
        }
    }
}

/// A request ready for dispatch: sanitized URL, full header list, and a
/// body only when the method carries one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// One response header with all of its values. `name` is `None` for the
/// status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    pub name: Option<String>,
    pub values: Vec<String>,
}

impl HeaderEntry {
    pub fn new(name: &str, values: &[&str]) -> Self {
        Self {
            name: Some(name.to_string()),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn status_line(line: &str) -> Self {
        Self {
            name: None,
            values: vec![line.to_string()],
        }
    }
}

/// A response as handed back by a transport, body not yet read.
///
/// For 2xx statuses `body` is the success stream; otherwise it is the error
/// stream the server sent alongside the status.
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<HeaderEntry>,
    pub body: Box<dyn Read>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
