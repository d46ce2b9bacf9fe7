//! Routing core for lambda-router.
//!
//! This crate maps one invocation request to one response envelope:
//! - [`PathPattern`]: Compiled `/users/:id` style path templates
//! - [`RouteTable`]: Ordered, first-match route registrations
//! - [`Params`]: Named values captured from a matched path
//! - [`CorsPolicy`]: Origin allow decisions and access-control headers
//! - [`Router`]: The per-invocation dispatcher, built by [`RouterBuilder`]
//! - [`ResponseEnvelope`]: The uniform `{statusCode, headers, body}` output
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     RouterBuilder                       │
//! │  (Startup only)                                         │
//! │  - add_route / get / post / put / patch / delete        │
//! │  - CORS configuration                                   │
//! └─────────────────────────────────────────────────────────┘
//!                            │ build()
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                        Router                           │
//! │  (Immutable, shared across invocations)                 │
//! │  - RouteTable (registration order)                      │
//! │  - CorsPolicy                                           │
//! └─────────────────────────────────────────────────────────┘
//!                            │ handle()
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │      Request + InvocationContext → ResponseEnvelope     │
//! │  (Per invocation)                                       │
//! │  - Preflight or route lookup                            │
//! │  - Params, handler call, envelope, CORS headers         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use lambda_router_core::{InvocationContext, Params, Request, Router, handler_fn};
//!
//! let mut builder = Router::builder();
//! builder.get(
//!     "/users/:id",
//!     handler_fn(|_ctx: &InvocationContext, _req: &Request, params: &Params| {
//!         Ok(serde_json::json!({ "id": params.get("id") }))
//!     }),
//! )?;
//! let router = builder.build()?;
//!
//! let response = router
//!     .handle(&InvocationContext::new("req-1"), &Request::new("GET", "/users/42"))
//!     .await;
//! assert_eq!(response.status_code, 200);
//! ```

pub mod context;
pub mod cors;
pub mod dispatcher;
pub mod event;
pub mod handler;
pub mod params;
pub mod pattern;
pub mod request;
pub mod response;
pub mod table;

pub use context::{CancelSignal, Canceller, InvocationContext};
pub use cors::CorsPolicy;
pub use dispatcher::{Router, RouterBuilder};
pub use event::FunctionUrlEvent;
pub use handler::{Handler, HandlerFn, HandlerResult, handler_fn};
pub use params::{Params, extract_params};
pub use pattern::PathPattern;
pub use request::Request;
pub use response::ResponseEnvelope;
pub use table::{Route, RouteTable};

pub use lambda_router_common::{AllowList, CorsConfig, HandlerError, RouterError};
