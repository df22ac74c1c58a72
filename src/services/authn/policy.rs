/// Which identity sources an authenticator may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthVariant {
    /// Only trust an identity the upstream gateway authorizer already attached.
    GatewayClaims,
    /// Upstream identity first, then (optionally) claims decoded from the bearer token.
    TokenFallback,
}

impl AuthVariant {
    pub fn default_scheme_name(&self) -> &'static str {
        match self {
            Self::GatewayClaims => "AwsAuthorizer",
            Self::TokenFallback => "AwsJwtAuthorizer",
        }
    }

    pub(crate) fn no_identity_message(&self) -> &'static str {
        match self {
            Self::GatewayClaims => "could not find a user authenticated upstream",
            Self::TokenFallback => "invalid authentication request",
        }
    }
}

/// Strictness knobs, fixed at startup.
///
/// Ignored by [`AuthVariant::GatewayClaims`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyOptions {
    /// A bearer token must be present before any other check runs.
    pub require_token: bool,
    /// With no upstream identity, decode the bearer token and trust its claims.
    /// Signatures are NOT verified.
    pub extract_claims_from_token: bool,
}

impl Default for PolicyOptions {
    fn default() -> Self {
        Self {
            require_token: true,
            extract_claims_from_token: false,
        }
    }
}

impl PolicyOptions {
    /// Local runs without a gateway: token is only looked at when no upstream identity exists.
    pub fn local_development() -> Self {
        Self {
            require_token: false,
            extract_claims_from_token: true,
        }
    }
}
