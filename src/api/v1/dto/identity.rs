/*
 * Responsibility
 * - 認証済みユーザー (Identity) の response DTO
 */
use serde::Serialize;

use crate::services::authn::{Claim, Identity};

#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub scheme: String,
    pub name: Option<String>,
    pub claims: Vec<Claim>,
}

impl From<&Identity> for IdentityResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            scheme: identity.scheme().to_string(),
            name: identity.name().map(str::to_string),
            claims: identity.claims().to_vec(),
        }
    }
}
