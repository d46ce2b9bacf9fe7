//! Route handlers.
//!
//! A [`Handler`] receives the invocation context, the request and the
//! captured parameters, and returns either a serializable value or a
//! [`HandlerError`]. Plain functions and closures become handlers through
//! [`handler_fn`]; handlers that need to await implement the trait directly.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::Serialize;

use lambda_router_common::HandlerError;

use crate::context::InvocationContext;
use crate::params::Params;
use crate::request::Request;
use crate::response::ResponseEnvelope;

/// Result returned by a handler.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Application code invoked when a route matches.
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    /// Success value, serialized to JSON.
    type Output: Serialize + Send;

    /// Handle one request.
    async fn call(
        &self,
        ctx: &InvocationContext,
        request: &Request,
        params: &Params,
    ) -> HandlerResult<Self::Output>;
}

/// A synchronous function used as a [`Handler`].
pub struct HandlerFn<F, T> {
    f: F,
    _output: PhantomData<fn() -> T>,
}

/// Wrap a function or closure as a [`Handler`].
///
/// ```ignore
/// let handler = handler_fn(|_ctx: &InvocationContext, _req: &Request, params: &Params| {
///     Ok(serde_json::json!({ "id": params.get("id") }))
/// });
/// ```
pub fn handler_fn<F, T>(f: F) -> HandlerFn<F, T>
where
    F: Fn(&InvocationContext, &Request, &Params) -> HandlerResult<T> + Send + Sync + 'static,
    T: Serialize + Send + 'static,
{
    HandlerFn {
        f,
        _output: PhantomData,
    }
}

#[async_trait]
impl<F, T> Handler for HandlerFn<F, T>
where
    F: Fn(&InvocationContext, &Request, &Params) -> HandlerResult<T> + Send + Sync + 'static,
    T: Serialize + Send + 'static,
{
    type Output = T;

    async fn call(
        &self,
        ctx: &InvocationContext,
        request: &Request,
        params: &Params,
    ) -> HandlerResult<T> {
        (self.f)(ctx, request, params)
    }
}

impl<F, T> fmt::Debug for HandlerFn<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn").finish_non_exhaustive()
    }
}

/// Object-safe view of a [`Handler`] that yields a finished envelope.
#[async_trait]
pub(crate) trait ErasedHandler: Send + Sync {
    async fn respond(
        &self,
        ctx: &InvocationContext,
        request: &Request,
        params: &Params,
    ) -> ResponseEnvelope;
}

#[async_trait]
impl<H: Handler> ErasedHandler for H {
    async fn respond(
        &self,
        ctx: &InvocationContext,
        request: &Request,
        params: &Params,
    ) -> ResponseEnvelope {
        ResponseEnvelope::from_result(self.call(ctx, request, params).await)
    }
}

/// A type-erased handler stored in the route table.
pub(crate) type BoxedHandler = Box<dyn ErasedHandler>;
