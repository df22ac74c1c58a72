//! API Gateway request context → `UpstreamPrincipal` in extensions.
//!
//! Only mount this when the service really sits behind the Lambda Web Adapter:
//! the adapter overwrites `x-amzn-request-context`, anything else lets clients
//! forge it.

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::services::authn::Claim;
use crate::services::gateway::{REQUEST_CONTEXT_HEADER, claims_from_request_context};

/// Identity established by the upstream gateway authorizer before this service ran.
///
/// Hosts that learn the upstream identity some other way can insert this
/// extension themselves; the auth middleware only looks at the extension.
#[derive(Debug, Clone, Default)]
pub struct UpstreamPrincipal(pub Vec<Claim>);

pub fn apply<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn(gateway_context_middleware))
}

async fn gateway_context_middleware(mut req: Request<Body>, next: Next) -> Response {
    let raw = req
        .headers()
        .get(REQUEST_CONTEXT_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    if let Some(raw) = raw {
        match claims_from_request_context(&raw) {
            Ok(claims) if !claims.is_empty() => {
                req.extensions_mut().insert(UpstreamPrincipal(claims));
            }
            Ok(_) => {}
            // Not a reason to fail the request; the auth middleware decides.
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unparseable gateway request context");
            }
        }
    }

    next.run(req).await
}
