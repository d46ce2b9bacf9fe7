//! Route registration table.
//!
//! Routes are kept in registration order and looked up by a linear scan. The
//! first route whose method and pattern both match wins, so a later route
//! with the same method and template can never be reached ("shadowing").

use std::fmt;

use tracing::warn;

use lambda_router_common::RouterError;

use crate::handler::{BoxedHandler, ErasedHandler, Handler};
use crate::pattern::PathPattern;

/// A registered route.
pub struct Route {
    method: String,
    pattern: PathPattern,
    handler: BoxedHandler,
}

impl Route {
    /// HTTP method this route answers, compared exactly.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The template the route was registered with.
    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    /// The compiled path pattern.
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Returns `true` if this route answers `method` on `path`.
    pub fn matches(&self, method: &str, path: &str) -> bool {
        self.method == method && self.pattern.matches(path)
    }

    pub(crate) fn handler(&self) -> &dyn ErasedHandler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("template", &self.template())
            .finish_non_exhaustive()
    }
}

/// Ordered collection of routes.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `template` and append a route.
    ///
    /// No uniqueness check is made. A duplicate (method, template) pair is
    /// accepted but unreachable, and a warning is logged.
    pub(crate) fn add<H: Handler>(
        &mut self,
        method: &str,
        template: &str,
        handler: H,
    ) -> Result<(), RouterError> {
        let pattern = PathPattern::compile(template)?;

        if self
            .routes
            .iter()
            .any(|r| r.method == method && r.template() == template)
        {
            warn!(method, template, "Route is shadowed by an earlier registration");
        }

        self.routes.push(Route {
            method: method.to_string(),
            pattern,
            handler: Box::new(handler),
        });
        Ok(())
    }

    /// The first route matching `method` and `path`, in registration order.
    pub fn find(&self, method: &str, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.matches(method, path))
    }

    /// Number of registered routes, including shadowed ones.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate over routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }
}
