/*
 * Responsibility
 * - 認証判定で使うデータ型 (Claim / Identity / AuthenticationResult)
 * - すべて request-scoped。生成後に書き換えない
 */
use serde::Serialize;

use super::error::AuthFailure;

/// A single typed fact about the caller.
///
/// Duplicate types are legal (e.g. several `role` claims) and keep their order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claim {
    #[serde(rename = "type")]
    pub claim_type: String,
    pub value: String,
}

impl Claim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }
}

/// "Who this caller is" after resolution: the claims plus the scheme that produced them.
///
/// Fields are private so an `Identity` cannot be edited once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    scheme: String,
    claims: Vec<Claim>,
}

impl Identity {
    pub(crate) fn new(scheme: impl Into<String>, claims: Vec<Claim>) -> Self {
        Self {
            scheme: scheme.into(),
            claims,
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn find_first(&self, claim_type: &str) -> Option<&str> {
        self.claims
            .iter()
            .find(|c| c.claim_type == claim_type)
            .map(|c| c.value.as_str())
    }

    /// Display name for logs: `name`, falling back to `sub`.
    pub fn name(&self) -> Option<&str> {
        self.find_first("name").or_else(|| self.find_first("sub"))
    }
}

/// Terminal value handed back to the HTTP layer.
#[derive(Debug)]
pub enum AuthenticationResult {
    Success(Identity),
    Failure(AuthFailure),
}

impl AuthenticationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Success(identity) => Some(identity),
            Self::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&AuthFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(reason) => Some(reason),
        }
    }

    pub fn into_result(self) -> Result<Identity, AuthFailure> {
        match self {
            Self::Success(identity) => Ok(identity),
            Self::Failure(reason) => Err(reason),
        }
    }
}

impl From<Result<Identity, AuthFailure>> for AuthenticationResult {
    fn from(r: Result<Identity, AuthFailure>) -> Self {
        match r {
            Ok(identity) => Self::Success(identity),
            Err(reason) => Self::Failure(reason),
        }
    }
}

/// Snapshot of what the authenticator needs from one request.
///
/// Built by the HTTP layer; the core never reaches back into the request.
#[derive(Debug, Clone, Default)]
pub struct AuthRequest {
    pub scheme: String,
    /// Every `Authorization` header value, in the order received.
    pub authorization: Vec<String>,
    /// Claims attached by the upstream gateway authorizer (empty when none).
    pub upstream: Vec<Claim>,
}

impl AuthRequest {
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            ..Default::default()
        }
    }

    pub fn with_authorization<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authorization = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_upstream(mut self, claims: Vec<Claim>) -> Self {
        self.upstream = claims;
        self
    }
}
