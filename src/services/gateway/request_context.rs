//! API Gateway request context → upstream claims.
//!
//! Behind the AWS Lambda Web Adapter the original request context arrives as
//! JSON in the `x-amzn-request-context` header. The authorizer output sits at
//! one of these places, depending on the gateway flavor:
//!
//! - HTTP API, JWT authorizer:     `authorizer.jwt.claims`
//! - REST API, Cognito authorizer: `authorizer.claims`
//! - HTTP API, Lambda authorizer:  `authorizer.lambda`
//!
//! The document may also be a whole proxy event, in which case the context is
//! read from its `requestContext` member.

use serde_json::{Map, Value};

use crate::services::authn::Claim;
use crate::services::authn::claims::claims_from_json;

pub const REQUEST_CONTEXT_HEADER: &str = "x-amzn-request-context";

#[derive(Debug, thiserror::Error)]
pub enum RequestContextError {
    #[error("invalid request context json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("request context is not a json object")]
    NotAnObject,
}

/// Claims the gateway authorizer attached, or an empty list when there are none.
pub fn claims_from_request_context(raw: &str) -> Result<Vec<Claim>, RequestContextError> {
    let document: Value = serde_json::from_str(raw)?;
    let Value::Object(document) = document else {
        return Err(RequestContextError::NotAnObject);
    };

    let context = match document.get("requestContext") {
        Some(Value::Object(inner)) => inner,
        _ => &document,
    };

    Ok(authorizer_claims(context)
        .map(claims_from_json)
        .unwrap_or_default())
}

fn authorizer_claims(context: &Map<String, Value>) -> Option<&Map<String, Value>> {
    let authorizer = context.get("authorizer")?.as_object()?;

    authorizer
        .get("jwt")
        .and_then(|jwt| jwt.get("claims"))
        .and_then(Value::as_object)
        .or_else(|| authorizer.get("claims").and_then(Value::as_object))
        .or_else(|| authorizer.get("lambda").and_then(Value::as_object))
}
