/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc なので clone は軽い)
 */
use std::sync::Arc;

use crate::services::authn::Authenticator;

#[derive(Clone, Debug)]
pub struct AppState {
    pub authenticator: Arc<Authenticator>,
    pub gateway_context_header_enabled: bool,
}

impl AppState {
    pub fn new(authenticator: Arc<Authenticator>, gateway_context_header_enabled: bool) -> Self {
        Self {
            authenticator,
            gateway_context_header_enabled,
        }
    }
}
