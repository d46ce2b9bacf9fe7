//! Demo route table served by the harness.

use serde::Serialize;

use lambda_router_common::{CorsConfig, HandlerError, RouterError};
use lambda_router_core::{InvocationContext, Params, Request, Router, handler_fn};

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct User {
    id: String,
}

#[derive(Debug, Serialize)]
struct Echo {
    request_id: String,
    body: Option<String>,
    base64: bool,
}

/// Build the demo router with the given CORS policy.
pub fn build_router(cors: CorsConfig) -> Result<Router, RouterError> {
    let mut builder = Router::builder();

    builder
        .get(
            "/health",
            handler_fn(|_: &InvocationContext, _: &Request, _: &Params| {
                Ok(Health { status: "ok" })
            }),
        )?
        .get(
            "/users/:id",
            handler_fn(|_: &InvocationContext, _: &Request, params: &Params| {
                let id = params
                    .get("id")
                    .ok_or_else(|| HandlerError::bad_request("missing id"))?;
                if id.parse::<u64>().is_err() {
                    return Err(HandlerError::not_found(format!("user '{id}' not found")));
                }
                Ok(User { id: id.to_string() })
            }),
        )?
        .post(
            "/echo",
            handler_fn(|ctx: &InvocationContext, req: &Request, _: &Params| {
                Ok(Echo {
                    request_id: ctx.request_id().to_string(),
                    body: req.body.clone(),
                    base64: req.is_base64_encoded,
                })
            }),
        )?;

    builder.cors(cors);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_routes() {
        let router = build_router(CorsConfig::default()).unwrap();
        let ctx = InvocationContext::new("demo");

        let resp = router.handle(&ctx, &Request::new("GET", "/health")).await;
        assert_eq!(resp.body, r#"{"status":"ok"}"#);

        let resp = router.handle(&ctx, &Request::new("GET", "/users/7")).await;
        assert_eq!(resp.body, r#"{"id":"7"}"#);

        let resp = router.handle(&ctx, &Request::new("GET", "/users/ana")).await;
        assert_eq!(resp.status_code, 404);
        assert_eq!(resp.body, "Error: user 'ana' not found");

        let req = Request::new("POST", "/echo").with_body("hi");
        let resp = router.handle(&ctx, &req).await;
        assert_eq!(resp.body, r#"{"request_id":"demo","body":"hi","base64":false}"#);
    }
}
