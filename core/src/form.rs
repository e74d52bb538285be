//! Helpers for the request form that sits in front of the executor.
//!
//! The form offers fixed method and media-type choices, takes custom
//! headers as `Name:Value` lines, and shows either the formatted response
//! or the error text in its response pane.

use crate::error::SendError;
use crate::http::HttpMethod;

pub const METHOD_CHOICES: [HttpMethod; 7] = HttpMethod::ALL;

pub const CONTENT_TYPE_CHOICES: [&str; 4] = [
    "application/json",
    "application/xml",
    "text/html",
    "text/plain",
];

pub const ACCEPT_TYPE_CHOICES: [&str; 4] = CONTENT_TYPE_CHOICES;

/// Shown in place of a response when header lines were rejected.
pub const INVALID_HEADERS_MESSAGE: &str = "Invalid headers, use one Name:Value pair per line.";

/// A header line that did not split into exactly a name and a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidHeaderLine {
    /// 1-based.
    pub line: usize,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedHeaders {
    pub headers: Vec<(String, String)>,
    pub invalid_lines: Vec<InvalidHeaderLine>,
}

impl ParsedHeaders {
    pub fn is_valid(&self) -> bool {
        self.invalid_lines.is_empty()
    }

    /// Message for the response pane when any line was rejected.
    pub fn warning(&self) -> Option<String> {
        if self.is_valid() {
            return None;
        }
        let lines: Vec<String> = self.invalid_lines.iter().map(|l| l.line.to_string()).collect();
        Some(format!("{INVALID_HEADERS_MESSAGE} (line {})", lines.join(", ")))
    }
}

/// Parse the header text box. Rejected lines are collected rather than
/// aborting, so the caller can warn and still send the valid ones.
///
/// Name and value are kept exactly as typed, surrounding spaces included.
/// `Name:` (empty value) and `a:b:c` are both rejected.
pub fn parse_headers(text: &str) -> ParsedHeaders {
    let mut parsed = ParsedHeaders::default();
    for (index, line) in text.lines().enumerate() {
        let mut parts: Vec<&str> = line.split(':').collect();
        while parts.len() > 1 && parts.last().is_some_and(|p| p.is_empty()) {
            parts.pop();
        }
        match parts.as_slice() {
            [name, value] => parsed.headers.push((name.to_string(), value.to_string())),
            _ => parsed.invalid_lines.push(InvalidHeaderLine {
                line: index + 1,
                text: line.to_string(),
            }),
        }
    }
    parsed
}

/// Text for the response pane.
pub fn render_outcome(outcome: Result<String, SendError>) -> String {
    match outcome {
        Ok(text) => text,
        Err(err) => err.to_string(),
    }
}
