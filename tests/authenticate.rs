//! Authenticator behavior with real signed tokens.
//!
//! Tokens are minted with `jsonwebtoken` and a throwaway secret. The
//! authenticator never sees the secret, which is the point: claims come out
//! regardless of who signed the token.

use gateway_authn::services::authn::{
    AuthFailure, AuthVariant, Authenticator, Claim, PolicyOptions,
};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};

fn sample_claims() -> Vec<Claim> {
    vec![
        Claim::new("name", "My name"),
        Claim::new("email", "email@any.com"),
        Claim::new("custom-claim", "custom value"),
    ]
}

fn sample_payload() -> Value {
    json!({
        "name": "My name",
        "email": "email@any.com",
        "custom-claim": "custom value",
    })
}

fn mint(payload: &Value) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        payload,
        &EncodingKey::from_secret(b"any secret will do"),
    )
    .unwrap()
}

fn strict_fallback() -> Authenticator {
    Authenticator::token_fallback(
        AuthVariant::TokenFallback.default_scheme_name(),
        PolicyOptions {
            require_token: true,
            extract_claims_from_token: true,
        },
    )
}

#[test]
fn upstream_claims_authenticate_with_configured_scheme() {
    let authenticator = Authenticator::token_fallback(
        "AwsJwtAuthorizer",
        PolicyOptions {
            require_token: false,
            extract_claims_from_token: false,
        },
    );
    let request = authenticator.request().with_upstream(sample_claims());

    let result = authenticator.authenticate(&request);

    let identity = result.identity().expect("should authenticate");
    assert_eq!(identity.scheme(), "AwsJwtAuthorizer");
    assert_eq!(identity.claims(), sample_claims().as_slice());
}

#[test]
fn gateway_only_authenticates_upstream_claims() {
    let authenticator = Authenticator::gateway_claims("AwsAuthorizer");
    let request = authenticator.request().with_upstream(sample_claims());

    let identity = authenticator.authenticate(&request).into_result().unwrap();

    assert_eq!(identity.scheme(), "AwsAuthorizer");
    assert_eq!(identity.name(), Some("My name"));
    assert_eq!(identity.claims(), sample_claims().as_slice());
}

#[test]
fn gateway_only_never_reads_the_token() {
    let authenticator = Authenticator::gateway_claims("AwsAuthorizer");
    let token = mint(&sample_payload());
    let request = authenticator
        .request()
        .with_authorization([format!("Bearer {token}")]);

    let failure = authenticator.authenticate(&request).into_result().unwrap_err();

    assert!(matches!(
        failure,
        AuthFailure::NoIdentitySource(AuthVariant::GatewayClaims)
    ));
}

#[test]
fn token_claims_round_trip_in_order() {
    let authenticator = strict_fallback();
    let token = mint(&sample_payload());
    let request = authenticator
        .request()
        .with_authorization([format!("Bearer {token}")]);

    let identity = authenticator.authenticate(&request).into_result().unwrap();

    assert_eq!(identity.scheme(), "AwsJwtAuthorizer");
    assert_eq!(identity.claims(), sample_claims().as_slice());
}

#[test]
fn multi_valued_claims_survive_decoding() {
    let authenticator = strict_fallback();
    let token = mint(&json!({"sub": "u-1", "role": ["admin", "reader"]}));
    let request = authenticator
        .request()
        .with_authorization([format!("Bearer {token}")]);

    let identity = authenticator.authenticate(&request).into_result().unwrap();

    assert_eq!(
        identity.claims(),
        [
            Claim::new("sub", "u-1"),
            Claim::new("role", "admin"),
            Claim::new("role", "reader"),
        ]
        .as_slice()
    );
}

#[test]
fn upstream_claims_win_over_token() {
    let authenticator = strict_fallback();
    let token = mint(&json!({"sub": "from-token"}));
    let request = authenticator
        .request()
        .with_authorization([format!("Bearer {token}")])
        .with_upstream(vec![Claim::new("sub", "from-gateway")]);

    let identity = authenticator.authenticate(&request).into_result().unwrap();

    assert_eq!(identity.claims(), [Claim::new("sub", "from-gateway")].as_slice());
}

#[test]
fn missing_header_fails_with_uniform_message() {
    let authenticator = strict_fallback();
    let request = authenticator.request();

    let failure = authenticator.authenticate(&request).into_result().unwrap_err();

    assert!(matches!(failure, AuthFailure::MissingToken));
    assert_eq!(failure.to_string(), "invalid authentication request");
}

#[test]
fn boundary_headers_fail_with_default_options() {
    let authenticator =
        Authenticator::token_fallback("AwsJwtAuthorizer", PolicyOptions::default());

    for header in [None, Some(""), Some("invalid"), Some("Bearer"), Some("Bearer ")] {
        let request = authenticator.request().with_authorization(header);
        let result = authenticator.authenticate(&request);
        assert!(!result.is_success(), "header {header:?}");
        assert!(result.identity().is_none());
    }
}

#[test]
fn malformed_token_is_reported_as_decode_failure() {
    let authenticator = strict_fallback();
    let request = authenticator
        .request()
        .with_authorization(["Bearer definitely.not.json"]);

    let failure = authenticator.authenticate(&request).into_result().unwrap_err();

    assert!(matches!(failure, AuthFailure::Decode(_)));
}
