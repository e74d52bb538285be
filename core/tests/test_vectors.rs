//! Verify request assembly and charset sniffing against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Each vector file describes inputs and the exact values expected from the
//! core, so the same cases can be replayed by any other front-end.

use std::cell::RefCell;

use restclient_core::charset::detect_charset;
use restclient_core::executor::sanitize_url;
use restclient_core::{
    HeaderEntry, HttpMethod, HttpRequest, OutgoingRequest, RawResponse, RequestExecutor, SendError, Transport,
};

/// Captures the dispatched request and answers `204` with no body.
#[derive(Default)]
struct Capture {
    sent: RefCell<Option<OutgoingRequest>>,
}

impl Transport for Capture {
    fn execute(&self, request: OutgoingRequest) -> Result<RawResponse, SendError> {
        *self.sent.borrow_mut() = Some(request);
        Ok(RawResponse {
            status: 204,
            headers: vec![HeaderEntry::status_line("HTTP/1.1 204 No Content")],
            body: Box::new(std::io::empty()),
        })
    }
}

fn pairs(value: &serde_json::Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Charset
// ---------------------------------------------------------------------------

#[test]
fn charset_test_vectors() {
    let raw = include_str!("../../test-vectors/charset.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let mut headers = vec![HeaderEntry::status_line("HTTP/1.1 200 OK")];
        if let Some(content_type) = case["content_type"].as_str() {
            headers.push(HeaderEntry::new("Content-Type", &[content_type]));
        }
        assert_eq!(
            detect_charset(&headers),
            case["expected_charset"].as_str().unwrap(),
            "{name}: charset"
        );
    }
}

// ---------------------------------------------------------------------------
// URL sanitization
// ---------------------------------------------------------------------------

#[test]
fn url_test_vectors() {
    let raw = include_str!("../../test-vectors/url.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        assert_eq!(
            sanitize_url(case["input"].as_str().unwrap()),
            case["expected"].as_str().unwrap(),
            "{name}: url"
        );
    }
}

// ---------------------------------------------------------------------------
// Request assembly
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: HttpRequest = serde_json::from_value(case["input"].clone()).unwrap();
        let expected = &case["expected_request"];

        let capture = Capture::default();
        let output = RequestExecutor::new(&capture).send(&input).unwrap();
        assert_eq!(output, "[HTTP/1.1 204 No Content]\n\n\n", "{name}: output");

        let sent = capture.sent.borrow_mut().take().unwrap();
        let method: HttpMethod = expected["method"].as_str().unwrap().parse().unwrap();
        assert_eq!(sent.method, method, "{name}: method");
        assert_eq!(sent.url, expected["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(sent.headers, pairs(&expected["headers"]), "{name}: headers");
        assert_eq!(sent.body.as_deref(), expected["body"].as_str(), "{name}: body");
    }
}
