/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (HTTP 共通 / gateway context / 認証)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::health::health;
use crate::config::{AuthConfig, Config};
use crate::middleware;
use crate::services::authn::authenticator::is_resolving;
use crate::services::authn::{AuthVariant, Authenticator};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,gateway_authn=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the process is launched (Lambda).
        tracing::error!(?info, "panic");

        // Faults during authentication become a Failure (caught by the authenticator).
        if abort_on_panic && !is_resolving() {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_state(config: &Config) -> AppState {
    let authenticator = build_authenticator(&config.auth);

    if config.gateway_context_header_enabled {
        tracing::info!("trusting gateway request context header for upstream identity");
    }

    AppState::new(Arc::new(authenticator), config.gateway_context_header_enabled)
}

pub fn build_authenticator(auth: &AuthConfig) -> Authenticator {
    let authenticator = Authenticator::new(auth.scheme_name.as_str(), auth.variant, auth.options);

    tracing::info!(
        scheme = authenticator.scheme_name(),
        variant = ?authenticator.variant(),
        require_token = auth.options.require_token,
        extract_claims_from_token = auth.options.extract_claims_from_token,
        "authentication configured"
    );

    if auth.variant == AuthVariant::TokenFallback && auth.options.extract_claims_from_token {
        tracing::warn!(
            "bearer token claims are trusted WITHOUT signature verification; do not expose this service without a gateway authorizer"
        );
    }

    authenticator
}

pub fn build_router(state: AppState) -> Router {
    let v1 = middleware::auth::authn::apply(api::v1::routes(), state.clone());

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", v1)
        .with_state(state.clone());

    // gateway context must be read before the auth middleware runs (outer layer)
    let router = if state.gateway_context_header_enabled {
        middleware::gateway_context::apply(router)
    } else {
        router
    };

    middleware::http::apply(router)
}
