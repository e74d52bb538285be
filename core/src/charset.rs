//! Response charset sniffing and body decoding.
//!
//! The charset is whatever follows the first `=` in the response's
//! `Content-Type`. A header such as `multipart/form-data; boundary=xyz;
//! charset=utf-8` therefore yields `xyz; charset=utf-8`, which then falls
//! back to UTF-8 at decode time. This is the established behavior and is
//! kept as is.
//!
//! Decoding never fails: a label `encoding_rs` does not know is decoded as
//! UTF-8 with a warning instead of rejecting the whole response.

use encoding_rs::Encoding;
use log::warn;

use crate::http::HeaderEntry;

pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Charset name advertised by the response, or `DEFAULT_CHARSET`.
pub fn detect_charset(headers: &[HeaderEntry]) -> String {
    content_type(headers)
        .and_then(|value| value.split_once('='))
        .map(|(_, charset)| charset.to_string())
        .unwrap_or_else(|| DEFAULT_CHARSET.to_string())
}

/// Last `Content-Type` value, matched case-insensitively.
fn content_type(headers: &[HeaderEntry]) -> Option<&str> {
    headers
        .iter()
        .filter(|entry| {
            entry
                .name
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case("content-type"))
        })
        .flat_map(|entry| entry.values.iter())
        .last()
        .map(String::as_str)
}

/// Decode `bytes` using the charset `label`. Unknown labels decode as UTF-8.
///
/// Malformed sequences become U+FFFD. A leading byte order mark is kept.
pub fn decode(bytes: &[u8], label: &str) -> String {
    let encoding = Encoding::for_label(label.as_bytes()).unwrap_or_else(|| {
        warn!("unknown charset {label:?}, decoding as {DEFAULT_CHARSET}");
        encoding_rs::UTF_8
    });
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        warn!("response body is not valid {}", encoding.name());
    }
    text.into_owned()
}
