//! Request dispatch.
//!
//! Routes and CORS policy are collected by a [`RouterBuilder`] at startup
//! and sealed into an immutable [`Router`]. `Router::handle` is the
//! per-invocation entry point and always returns a well-formed envelope:
//!
//! ```text
//! OPTIONS ──────────────────────────────► preflight (CORS policy only)
//! other   ─► route lookup ─┬─ match ────► params ─► handler ─► envelope ─┐
//!                          └─ no match ─► 404 ───────────────────────────┤
//!                                                     attach CORS headers ◄┘
//! ```

use std::time::Instant;

use tracing::{debug, info, instrument};

use lambda_router_common::{CorsConfig, RouterError};

use crate::context::InvocationContext;
use crate::cors::CorsPolicy;
use crate::handler::Handler;
use crate::params::extract_params;
use crate::request::Request;
use crate::response::ResponseEnvelope;
use crate::table::RouteTable;

/// Collects routes and CORS configuration before serving starts.
#[derive(Debug, Default)]
pub struct RouterBuilder {
    routes: RouteTable,
    cors: CorsConfig,
}

impl RouterBuilder {
    /// Create a builder with no routes and a wildcard CORS policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `method` on `template`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be compiled.
    pub fn add_route<H: Handler>(
        &mut self,
        method: &str,
        template: &str,
        handler: H,
    ) -> Result<&mut Self, RouterError> {
        self.routes.add(method, template, handler)?;
        debug!(method, template, "Route registered");
        Ok(self)
    }

    /// Register a `GET` route.
    pub fn get<H: Handler>(&mut self, template: &str, handler: H) -> Result<&mut Self, RouterError> {
        self.add_route("GET", template, handler)
    }

    /// Register a `POST` route.
    pub fn post<H: Handler>(&mut self, template: &str, handler: H) -> Result<&mut Self, RouterError> {
        self.add_route("POST", template, handler)
    }

    /// Register a `PUT` route.
    pub fn put<H: Handler>(&mut self, template: &str, handler: H) -> Result<&mut Self, RouterError> {
        self.add_route("PUT", template, handler)
    }

    /// Register a `PATCH` route.
    pub fn patch<H: Handler>(&mut self, template: &str, handler: H) -> Result<&mut Self, RouterError> {
        self.add_route("PATCH", template, handler)
    }

    /// Register a `DELETE` route.
    pub fn delete<H: Handler>(&mut self, template: &str, handler: H) -> Result<&mut Self, RouterError> {
        self.add_route("DELETE", template, handler)
    }

    /// Set the CORS policy, replacing any earlier one.
    pub fn cors(&mut self, config: CorsConfig) -> &mut Self {
        self.cors = config;
        self
    }

    /// Validate the CORS policy and seal the router.
    pub fn build(self) -> Result<Router, RouterError> {
        let cors = CorsPolicy::new(self.cors)?;
        info!(
            routes = self.routes.len(),
            origins = %cors.config().origins,
            "Router built"
        );

        Ok(Router {
            routes: self.routes,
            cors,
        })
    }
}

/// An immutable router, safe to share across concurrent invocations.
#[derive(Debug)]
pub struct Router {
    routes: RouteTable,
    cors: CorsPolicy,
}

impl Router {
    /// Start building a router.
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// The registered routes.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// The CORS policy.
    pub fn cors(&self) -> &CorsPolicy {
        &self.cors
    }

    /// Handle one invocation.
    ///
    /// The handler is awaited to completion. The context, including its
    /// cancellation signal, is passed through untouched.
    #[instrument(
        name = "dispatch",
        skip_all,
        fields(request_id = %ctx.request_id(), method = %request.method, path = %request.path)
    )]
    pub async fn handle(&self, ctx: &InvocationContext, request: &Request) -> ResponseEnvelope {
        let start = Instant::now();
        let origin = request.origin();

        if origin.is_none() && request.has_miscased_origin() {
            debug!("Origin header present with non-lowercase key; treating as missing");
        }

        if request.is_preflight() {
            let response = self.cors.preflight(origin);
            info!(
                status = response.status_code,
                duration_us = start.elapsed().as_micros(),
                "Preflight completed"
            );
            return response;
        }

        let (mut response, template) = match self.routes.find(&request.method, &request.path) {
            Some(route) => {
                let params = extract_params(&request.path, route.pattern());
                debug!(template = route.template(), params = params.len(), "Route matched");
                let response = route.handler().respond(ctx, request, &params).await;
                (response, Some(route.template()))
            }
            None => {
                debug!("No route matched");
                (ResponseEnvelope::not_found(), None)
            }
        };

        self.cors.attach_headers(&mut response, origin);

        info!(
            status = response.status_code,
            template,
            duration_us = start.elapsed().as_micros(),
            "Request completed"
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cors::ALLOW_ORIGIN;
    use crate::handler::handler_fn;
    use crate::params::Params;

    fn echo_params() -> impl Handler {
        handler_fn(|_: &InvocationContext, _: &Request, params: &Params| Ok(params.clone()))
    }

    fn ctx() -> InvocationContext {
        InvocationContext::new("test")
    }

    #[tokio::test]
    async fn test_route_match() {
        let mut builder = Router::builder();
        builder.get("/users/:id", echo_params()).unwrap();
        let router = builder.build().unwrap();

        let resp = router.handle(&ctx(), &Request::new("GET", "/users/42")).await;

        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.body, r#"{"id":"42"}"#);
        assert_eq!(resp.header("Content-Type"), Some("application/json"));
        assert_eq!(resp.header(ALLOW_ORIGIN), Some("*"));
    }

    #[tokio::test]
    async fn test_not_found_gets_cors_headers() {
        let router = Router::builder().build().unwrap();

        let req = Request::new("GET", "/missing").with_header("origin", "https://a.example");
        let resp = router.handle(&ctx(), &req).await;

        assert_eq!(resp.status_code, 404);
        assert_eq!(resp.body, "Route not found");
        assert_eq!(resp.header(ALLOW_ORIGIN), Some("https://a.example"));
    }

    #[tokio::test]
    async fn test_method_mismatch_is_not_found() {
        let mut builder = Router::builder();
        builder.post("/items", echo_params()).unwrap();
        let router = builder.build().unwrap();

        let resp = router.handle(&ctx(), &Request::new("GET", "/items")).await;
        assert_eq!(resp.status_code, 404);
    }

    #[tokio::test]
    async fn test_options_skips_routes() {
        let mut builder = Router::builder();
        let never_called = handler_fn(|_: &InvocationContext, _: &Request, _: &Params| {
            Err::<(), _>(lambda_router_common::HandlerError::internal("must not run"))
        });
        builder.add_route("OPTIONS", "/items", never_called).unwrap();
        let router = builder.build().unwrap();

        let resp = router.handle(&ctx(), &Request::new("OPTIONS", "/items")).await;
        assert_eq!(resp.status_code, 200);
        assert!(resp.body.is_empty());
    }

    #[test]
    fn test_builder_chaining() {
        let mut builder = Router::builder();
        builder
            .get("/a", echo_params())
            .and_then(|b| b.put("/a", echo_params()))
            .and_then(|b| b.patch("/a", echo_params()))
            .and_then(|b| b.delete("/a", echo_params()))
            .unwrap();
        let router = builder.build().unwrap();

        let methods: Vec<&str> = router.routes().iter().map(|r| r.method()).collect();
        assert_eq!(methods, ["GET", "PUT", "PATCH", "DELETE"]);
    }

    #[test]
    fn test_build_rejects_invalid_cors() {
        let mut builder = Router::builder();
        builder.cors(CorsConfig {
            headers: lambda_router_common::AllowList::List(vec!["*".into(), "X-Id".into()]),
            ..Default::default()
        });

        let err = builder.build().unwrap_err();
        assert!(matches!(err, RouterError::InvalidConfig { .. }));
    }

    #[test]
    fn test_router_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Router>();
    }
}
