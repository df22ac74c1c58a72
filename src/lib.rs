//! Authentication decision layer for services behind an API gateway.
//!
//! Each request is authenticated either from the identity the upstream gateway
//! authorizer already established, or (for local runs without a gateway) from
//! the claims of the bearer token, which are decoded without verification.
//! See [`services::authn`] for the decision logic.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
