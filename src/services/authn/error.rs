use thiserror::Error;

use super::policy::AuthVariant;
use super::token_decoder::DecodeError;

/// Why a request was treated as unauthenticated.
///
/// The message is meant for logs. The HTTP layer never returns it to the caller.
#[derive(Debug, Error)]
pub enum AuthFailure {
    #[error("invalid authentication request")]
    MissingToken,

    #[error("{}", .0.no_identity_message())]
    NoIdentitySource(AuthVariant),

    #[error("token could not be decoded: {0}")]
    Decode(#[from] DecodeError),

    #[error("internal fault during authentication: {0}")]
    Internal(String),
}

impl AuthFailure {
    /// Short stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingToken => "missing_token",
            Self::NoIdentitySource(_) => "no_identity_source",
            Self::Decode(_) => "decode_error",
            Self::Internal(_) => "internal_fault",
        }
    }
}
