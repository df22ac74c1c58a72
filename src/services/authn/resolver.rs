//! Identity resolution: decide which identity source wins for one request.
//!
//! Order, every request:
//! 1. token required? → bearer must be present (presence only, no decoding)
//! 2. upstream identity present? → it wins, the token is never looked at
//! 3. otherwise fail, or (token variant + extraction enabled) decode the bearer token

use tracing::{debug, info};

use super::bearer::extract_bearer_token;
use super::error::AuthFailure;
use super::identity::build_identity;
use super::policy::{AuthVariant, PolicyOptions};
use super::token_decoder::ClaimsDecoder;
use super::types::{AuthRequest, Identity};

pub fn resolve(
    request: &AuthRequest,
    variant: AuthVariant,
    options: PolicyOptions,
    decoder: &dyn ClaimsDecoder,
) -> Result<Identity, AuthFailure> {
    let mut token = None;

    if variant == AuthVariant::TokenFallback && options.require_token {
        debug!("validating bearer token presence");
        token = extract_bearer_token(&request.authorization);
        if token.is_none() {
            return Err(AuthFailure::MissingToken);
        }
    }

    if !request.upstream.is_empty() {
        debug!(scheme = %request.scheme, "found user already authenticated by the gateway authorizer");
        return Ok(build_identity(request.upstream.iter().cloned(), &request.scheme));
    }

    match variant {
        AuthVariant::GatewayClaims => Err(AuthFailure::NoIdentitySource(variant)),
        AuthVariant::TokenFallback => {
            if !options.extract_claims_from_token {
                return Err(AuthFailure::NoIdentitySource(variant));
            }

            let token = token
                .or_else(|| extract_bearer_token(&request.authorization))
                .ok_or(AuthFailure::NoIdentitySource(variant))?;

            info!("extracting claims from bearer token (signature not verified)");
            let claims = decoder.decode(&token)?;
            let identity = build_identity(claims, &request.scheme);

            info!(
                user = identity.name().unwrap_or("<unnamed>"),
                "request authenticated from token claims"
            );
            Ok(identity)
        }
    }
}
