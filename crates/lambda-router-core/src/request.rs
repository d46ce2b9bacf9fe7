//! Inbound invocation request.
//!
//! The hosting adapter supplies a [`Request`] for every invocation. Header
//! keys are used exactly as supplied; the router does not normalize case.

use std::collections::HashMap;

/// Header key the origin is read from.
pub const ORIGIN_HEADER: &str = "origin";

/// Method that marks a CORS preflight request.
pub const PREFLIGHT_METHOD: &str = "OPTIONS";

/// An inbound request as seen by the router.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path, without query string
    pub path: String,
    /// Request headers, keyed exactly as delivered by the hosting runtime
    pub headers: HashMap<String, String>,
    /// Optional request body, unparsed
    pub body: Option<String>,
    /// Whether `body` is base64 encoded
    pub is_base64_encoded: bool,
}

impl Request {
    /// Create a request with no headers and no body.
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            ..Default::default()
        }
    }

    /// Add a header to the request.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Get a header value by its exact key.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// The `origin` header, if present and non-empty.
    pub fn origin(&self) -> Option<&str> {
        self.header(ORIGIN_HEADER).filter(|o| !o.is_empty())
    }

    /// Returns `true` if an origin header is present only under a key that
    /// differs from `origin` in case, such as `Origin`.
    pub fn has_miscased_origin(&self) -> bool {
        !self.headers.contains_key(ORIGIN_HEADER)
            && self
                .headers
                .keys()
                .any(|k| k.eq_ignore_ascii_case(ORIGIN_HEADER))
    }

    /// Returns `true` for a CORS preflight request.
    pub fn is_preflight(&self) -> bool {
        self.method == PREFLIGHT_METHOD
    }
}
