//! CORS policy evaluation.
//!
//! [`CorsPolicy`] answers preflight requests and stamps access-control
//! headers onto every other response. Allowed methods and headers are always
//! advertised in full. What a preflight asks for is never echoed back.

use tracing::debug;

use lambda_router_common::config::WILDCARD;
use lambda_router_common::{CorsConfig, RouterError};

use crate::response::ResponseEnvelope;

/// `Access-Control-Allow-Origin` header name.
pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";

/// `Access-Control-Allow-Methods` header name.
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";

/// `Access-Control-Allow-Headers` header name.
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";

/// Body of a rejected preflight.
pub const ORIGIN_REJECTED_BODY: &str = "Origin not allowed";

/// A validated CORS policy.
#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    config: CorsConfig,
}

impl CorsPolicy {
    /// Validate `config` and build a policy.
    pub fn new(config: CorsConfig) -> Result<Self, RouterError> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    /// The configuration this policy enforces.
    pub fn config(&self) -> &CorsConfig {
        &self.config
    }

    /// Returns `true` if `origin` may make cross-origin requests.
    ///
    /// With an explicit list the comparison is exact and case-sensitive.
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.config.origins.allows(origin)
    }

    /// Answer a preflight request.
    ///
    /// A disallowed or, with an explicit origin list, missing origin gets a
    /// 403 without any CORS headers. Otherwise the response is a 200 with
    /// the origin echoed and the full method and header lists.
    pub fn preflight(&self, origin: Option<&str>) -> ResponseEnvelope {
        let allowed = match origin {
            Some(origin) if self.is_origin_allowed(origin) => origin,
            None if self.config.origins.is_any() => WILDCARD,
            _ => {
                debug!(origin, "Preflight rejected");
                return ResponseEnvelope::new(403, ORIGIN_REJECTED_BODY);
            }
        };

        ResponseEnvelope::new(200, "")
            .with_header(ALLOW_ORIGIN, allowed)
            .with_header(ALLOW_METHODS, &self.config.methods.header_value())
            .with_header(ALLOW_HEADERS, &self.config.headers.header_value())
    }

    /// Add access-control headers to a non-preflight response.
    ///
    /// A missing or disallowed origin is answered with `*`.
    pub fn attach_headers(&self, response: &mut ResponseEnvelope, origin: Option<&str>) {
        let allowed = origin
            .filter(|o| self.is_origin_allowed(o))
            .unwrap_or(WILDCARD);

        response.set_header(ALLOW_ORIGIN, allowed);
        response.set_header(ALLOW_METHODS, &self.config.methods.header_value());
        response.set_header(ALLOW_HEADERS, &self.config.headers.header_value());
    }
}
