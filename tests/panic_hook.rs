//! The development panic hook aborts the process, but not for faults raised
//! while a request is being authenticated. Own test binary: the hook is global.

use std::sync::Arc;

use gateway_authn::app::init_panic_hook;
use gateway_authn::services::authn::authenticator::is_resolving;
use gateway_authn::services::authn::{
    AuthFailure, Authenticator, Claim, ClaimsDecoder, DecodeError, PolicyOptions,
};

struct FailingDecoder;

impl ClaimsDecoder for FailingDecoder {
    fn decode(&self, _token: &str) -> Result<Vec<Claim>, DecodeError> {
        panic!("decoder blew up")
    }
}

#[test]
fn development_hook_lets_authentication_faults_become_failures() {
    init_panic_hook(true);

    let authenticator =
        Authenticator::token_fallback("AwsJwtAuthorizer", PolicyOptions::local_development())
            .with_decoder(Arc::new(FailingDecoder));
    let request = authenticator.request().with_authorization(["Bearer a.b.c"]);

    let result = authenticator.authenticate(&request);

    match result.into_result() {
        Err(AuthFailure::Internal(detail)) => assert_eq!(detail, "decoder blew up"),
        other => panic!("expected internal failure, got {other:?}"),
    }

    assert!(!is_resolving());

    // The process survives and keeps serving.
    let request = authenticator.request();
    assert!(!authenticator.authenticate(&request).is_success());
}
