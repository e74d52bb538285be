use axum::{
    body::Bytes,
    extract::Path,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{any, get},
    Json, Router,
};
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What `/echo` saw: method, request headers in arrival order, and body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Echo {
    /// All values received for `name`, compared case-insensitively.
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// `café` encoded as ISO-8859-1.
pub const LATIN1_BODY: &[u8] = &[0x63, 0x61, 0x66, 0xE9];

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .route("/redirect", get(redirect))
        .route("/latin1", get(latin1))
        .route("/multipart", get(multipart))
        .route("/files/{name}", get(file_name))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Echo> {
    debug!("echo {method} with {} header(s)", headers.len());
    let headers = headers
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
        .collect();
    Json(Echo {
        method: method.to_string(),
        headers,
        body,
    })
}

/// Responds with `code` and its lower-cased reason phrase as the body.
async fn status(Path(code): Path<u16>) -> Response {
    let Ok(status) = StatusCode::from_u16(code) else {
        return (StatusCode::BAD_REQUEST, "invalid status code").into_response();
    };
    let reason = status.canonical_reason().unwrap_or("unknown").to_lowercase();
    (status, [(header::CONTENT_TYPE, "text/plain")], reason).into_response()
}

async fn redirect() -> Redirect {
    Redirect::to("/echo")
}

async fn latin1() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=ISO-8859-1")],
        Bytes::from_static(LATIN1_BODY),
    )
}

async fn multipart() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "multipart/form-data; boundary=xyz")],
        "naïve",
    )
}

async fn file_name(Path(name): Path<String>) -> String {
    name
}
