//! Response envelope construction.
//!
//! Every invocation produces exactly one [`ResponseEnvelope`], whether the
//! handler succeeded, returned an error, no route matched, or a preflight
//! was rejected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use lambda_router_common::HandlerError;

use crate::handler::HandlerResult;

/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Body of the 404 envelope.
pub const NOT_FOUND_BODY: &str = "Route not found";

/// Message of the 500 envelope produced when a success value cannot be serialized.
pub const SERIALIZATION_FAILED_MESSAGE: &str = "failed to serialize response";

/// The uniform output of the router.
///
/// Serializes to the function URL response shape:
/// `{"statusCode": 200, "headers": {...}, "body": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// HTTP status code
    pub status_code: u16,
    /// Response headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Response body
    #[serde(default)]
    pub body: String,
}

impl ResponseEnvelope {
    /// Create an envelope with no headers.
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Serialize a handler's success value into a 200 JSON envelope.
    ///
    /// The status is always 200. A value that fails to serialize yields a
    /// 500 error envelope instead.
    pub fn success<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self::new(200, body).with_header(CONTENT_TYPE, "application/json"),
            Err(e) => {
                error!(error = %e, "Failed to serialize handler response");
                Self::from_error(&HandlerError::internal(SERIALIZATION_FAILED_MESSAGE))
            }
        }
    }

    /// Convert a handler error: status is the error's code, body is
    /// `"Error: <message>"`, and no `Content-Type` is set.
    pub fn from_error(err: &HandlerError) -> Self {
        Self::new(err.code(), format!("Error: {}", err.message()))
    }

    /// Build the envelope for a handler result.
    pub fn from_result<T: Serialize>(result: HandlerResult<T>) -> Self {
        match result {
            Ok(value) => Self::success(&value),
            Err(err) => {
                warn!(status = err.code(), message = err.message(), "Handler returned an error");
                Self::from_error(&err)
            }
        }
    }

    /// The 404 envelope for a request no route matched.
    pub fn not_found() -> Self {
        Self::new(404, NOT_FOUND_BODY)
    }

    /// Add or replace a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.set_header(name, value);
        self
    }

    /// Add or replace a header in place.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Get a header value by its exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
