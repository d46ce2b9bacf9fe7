//! Error types for lambda-router.
//!
//! This module defines the error types using `thiserror`:
//! - [`RouterError`]: Registration and configuration failures, raised at startup
//! - [`HandlerError`]: The error half of a handler result, converted into a response

use thiserror::Error;

/// Startup errors.
///
/// These are raised while routes are registered or the router is sealed,
/// never while a request is being handled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A path template could not be compiled.
    #[error("Invalid path template '{template}': {reason}")]
    InvalidTemplate {
        /// The offending template.
        template: String,
        /// Description of what is wrong with it.
        reason: String,
    },

    /// A parameter name appears more than once in a template.
    #[error("Duplicate parameter ':{name}' in path template '{template}'")]
    DuplicateParam {
        /// The offending template.
        template: String,
        /// The repeated parameter name.
        name: String,
    },

    /// Invalid configuration was provided.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },
}

impl RouterError {
    /// Create a new `InvalidTemplate` error.
    pub fn invalid_template(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.into(),
            reason: reason.into(),
        }
    }

    /// Create a new `DuplicateParam` error.
    pub fn duplicate_param(template: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateParam {
            template: template.into(),
            name: name.into(),
        }
    }

    /// Create a new `InvalidConfig` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error comes from a malformed path template.
    pub fn is_template_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTemplate { .. } | Self::DuplicateParam { .. }
        )
    }
}

/// Error returned by a route handler.
///
/// Carries the HTTP status code to respond with and a human-readable
/// message. The code is passed through to the response unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (status {code})")]
pub struct HandlerError {
    code: u16,
    message: String,
}

impl HandlerError {
    /// Create a handler error with an explicit status code.
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    /// 401 Unauthorized.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(401, message)
    }

    /// 403 Forbidden.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(403, message)
    }

    /// 404 Not Found.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }

    /// 500 Internal Server Error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(500, message)
    }

    /// The status code to respond with.
    pub fn code(&self) -> u16 {
        self.code
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` for 5xx codes.
    pub fn is_server_error(&self) -> bool {
        self.code >= 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RouterError::duplicate_param("/a/:id/:id", "id");
        assert_eq!(
            err.to_string(),
            "Duplicate parameter ':id' in path template '/a/:id/:id'"
        );

        let err = RouterError::invalid_config("origins must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: origins must not be empty"
        );
    }

    #[test]
    fn test_is_template_error() {
        assert!(RouterError::invalid_template("users", "must start with '/'").is_template_error());
        assert!(RouterError::duplicate_param("/:a/:a", "a").is_template_error());
        assert!(!RouterError::invalid_config("bad").is_template_error());
    }

    #[test]
    fn test_handler_error_accessors() {
        let err = HandlerError::not_found("not found");
        assert_eq!(err.code(), 404);
        assert_eq!(err.message(), "not found");
        assert!(!err.is_server_error());
        assert_eq!(err.to_string(), "not found (status 404)");

        assert!(HandlerError::internal("boom").is_server_error());
        assert_eq!(HandlerError::new(418, "teapot").code(), 418);
    }
}
