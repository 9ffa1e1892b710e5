//! Materialized HTTP responses
//!
//! Checks never perform I/O: they read a `Response` whose body has already
//! been fully downloaded. Nothing under `checks` or `dom` depends on `fetch`;
//! it exists only so the audit runner and CLI can gather responses from live
//! URLs. Tests and embedders build `Response` values directly and never need
//! a network client.

mod fetch;

pub use fetch::{build_http_client, fetch, DEFAULT_USER_AGENT};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// A fully materialized HTTP response
#[derive(Debug, Clone, Default)]
pub struct Response {
    status: u16,
    headers: HeaderMap,
    body: String,
}

impl Response {
    /// Creates an empty response with the given status code
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: String::new(),
        }
    }

    /// Creates a response from already-collected parts
    pub fn from_parts(status: u16, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Convenience constructor for a `text/html` response
    pub fn html(status: u16, body: impl Into<String>) -> Self {
        Self::new(status)
            .with_header("Content-Type", "text/html; charset=utf-8")
            .with_body(body)
    }

    /// Returns a copy with the header set
    ///
    /// Header names are matched case-insensitively. Names or values that are
    /// not valid HTTP tokens are dropped with a warning.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => {
                tracing::warn!("Ignoring invalid header {:?}: {:?}", name, value);
            }
        }
        self
    }

    /// Returns a copy with the body replaced
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Case-insensitive header lookup
    ///
    /// Returns `None` when the header is absent or not valid visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// 2xx
    pub fn successful(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 3xx
    pub fn redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// 4xx
    pub fn client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// 5xx
    pub fn server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}
