//! Function URL event codec.
//!
//! Converts the hosting runtime's JSON invocation event into a [`Request`].
//! The response direction needs no conversion: [`ResponseEnvelope`]
//! serializes to the function URL response shape as is.
//!
//! [`ResponseEnvelope`]: crate::ResponseEnvelope

use std::collections::HashMap;

use serde::Deserialize;

use crate::request::Request;

/// A function URL invocation event.
///
/// Only the fields the router uses are decoded; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionUrlEvent {
    /// Request headers, as delivered by the runtime
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Request body, possibly base64 encoded
    #[serde(default)]
    pub body: Option<String>,
    /// Whether `body` is base64 encoded
    #[serde(default)]
    pub is_base64_encoded: bool,
    /// Request metadata
    pub request_context: EventRequestContext,
}

/// The `requestContext` object of an event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequestContext {
    /// Runtime-assigned request identifier
    #[serde(default)]
    pub request_id: String,
    /// HTTP method and path
    pub http: EventHttp,
}

/// The `requestContext.http` object of an event.
#[derive(Debug, Clone, Deserialize)]
pub struct EventHttp {
    /// HTTP method
    pub method: String,
    /// Request path
    pub path: String,
}

impl FunctionUrlEvent {
    /// Parse an event from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The runtime-assigned request id, if the event carries one.
    pub fn request_id(&self) -> Option<&str> {
        Some(self.request_context.request_id.as_str()).filter(|id| !id.is_empty())
    }

    /// Convert into a router [`Request`]. The body is passed through undecoded.
    pub fn into_request(self) -> Request {
        Request {
            method: self.request_context.http.method,
            path: self.request_context.http.path,
            headers: self.headers,
            body: self.body,
            is_base64_encoded: self.is_base64_encoded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENT: &str = r#"{
        "version": "2.0",
        "rawPath": "/users/42",
        "rawQueryString": "verbose=1",
        "headers": {
            "origin": "https://example.com",
            "content-type": "application/json"
        },
        "requestContext": {
            "requestId": "c6af9ac6-7b61-11e6-9a41-93e8deadbeef",
            "http": {
                "method": "POST",
                "path": "/users/42",
                "protocol": "HTTP/1.1",
                "sourceIp": "203.0.113.7"
            }
        },
        "body": "{\"name\":\"ana\"}",
        "isBase64Encoded": false
    }"#;

    #[test]
    fn test_parse_event() {
        let event = FunctionUrlEvent::from_json(EVENT).unwrap();

        assert_eq!(event.request_id(), Some("c6af9ac6-7b61-11e6-9a41-93e8deadbeef"));

        let req = event.into_request();
        assert_eq!(req.method, "POST");
        assert_eq!(req.path, "/users/42");
        assert_eq!(req.origin(), Some("https://example.com"));
        assert_eq!(req.body.as_deref(), Some(r#"{"name":"ana"}"#));
        assert!(!req.is_base64_encoded);
    }

    #[test]
    fn test_parse_minimal_event() {
        let json = r#"{"requestContext": {"http": {"method": "GET", "path": "/"}}}"#;
        let event = FunctionUrlEvent::from_json(json).unwrap();

        assert!(event.request_id().is_none());
        let req = event.into_request();
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn test_base64_body_is_not_decoded() {
        let json = r#"{
            "requestContext": {"http": {"method": "PUT", "path": "/blob"}},
            "body": "aGVsbG8=",
            "isBase64Encoded": true
        }"#;
        let req = FunctionUrlEvent::from_json(json).unwrap().into_request();

        assert_eq!(req.body.as_deref(), Some("aGVsbG8="));
        assert!(req.is_base64_encoded);
    }

    #[test]
    fn test_missing_request_context_is_error() {
        assert!(FunctionUrlEvent::from_json(r#"{"rawPath": "/"}"#).is_err());
    }
}
