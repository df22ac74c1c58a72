use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::error::AuthFailure;
use super::policy::{AuthVariant, PolicyOptions};
use super::resolver::resolve;
use super::token_decoder::{ClaimsDecoder, UnverifiedJwtDecoder};
use super::types::{AuthRequest, AuthenticationResult};

thread_local! {
    static RESOLVING: Cell<bool> = const { Cell::new(false) };
}

/// True while this thread is inside [`Authenticator::authenticate`].
///
/// A panic hook checks this so a fault during resolution is not treated as fatal.
pub fn is_resolving() -> bool {
    RESOLVING.with(Cell::get)
}

// Resets the flag on drop, including while unwinding.
struct ResolvingGuard {
    previous: bool,
}

impl ResolvingGuard {
    fn enter() -> Self {
        Self {
            previous: RESOLVING.with(|r| r.replace(true)),
        }
    }
}

impl Drop for ResolvingGuard {
    fn drop(&mut self) {
        RESOLVING.with(|r| r.set(self.previous));
    }
}

/// Entry point the HTTP layer calls once per request.
///
/// Holds only read-only configuration, so one instance is shared across requests.
#[derive(Clone)]
pub struct Authenticator {
    scheme_name: String,
    variant: AuthVariant,
    options: PolicyOptions,
    decoder: Arc<dyn ClaimsDecoder>,
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("scheme_name", &self.scheme_name)
            .field("variant", &self.variant)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    /// Trust the gateway authorizer's identity, nothing else.
    pub fn gateway_claims(scheme_name: impl Into<String>) -> Self {
        Self::new(
            scheme_name,
            AuthVariant::GatewayClaims,
            PolicyOptions::default(),
        )
    }

    /// Gateway identity first, bearer token claims as a (configurable) fallback.
    pub fn token_fallback(scheme_name: impl Into<String>, options: PolicyOptions) -> Self {
        Self::new(scheme_name, AuthVariant::TokenFallback, options)
    }

    pub fn new(scheme_name: impl Into<String>, variant: AuthVariant, options: PolicyOptions) -> Self {
        Self {
            scheme_name: scheme_name.into(),
            variant,
            options,
            decoder: Arc::new(UnverifiedJwtDecoder),
        }
    }

    /// Replace the default (unverified) token decoder.
    pub fn with_decoder(mut self, decoder: Arc<dyn ClaimsDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn scheme_name(&self) -> &str {
        &self.scheme_name
    }

    pub fn variant(&self) -> AuthVariant {
        self.variant
    }

    pub fn options(&self) -> PolicyOptions {
        self.options
    }

    /// Start a request snapshot tagged with this authenticator's scheme.
    pub fn request(&self) -> AuthRequest {
        AuthRequest::new(self.scheme_name.as_str())
    }

    /// Resolve the caller's identity.
    ///
    /// Never panics: a fault inside resolution (e.g. a misbehaving custom decoder)
    /// comes back as [`AuthFailure::Internal`].
    pub fn authenticate(&self, request: &AuthRequest) -> AuthenticationResult {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = ResolvingGuard::enter();
            resolve(request, self.variant, self.options, self.decoder.as_ref())
        }));

        match outcome {
            Ok(resolved) => resolved.into(),
            Err(payload) => AuthenticationResult::Failure(AuthFailure::Internal(panic_detail(
                payload.as_ref(),
            ))),
        }
    }
}

fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
