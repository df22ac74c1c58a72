//! Middleware modules.
//!
//! - `http`: cross-cutting HTTP concerns (request id, tracing, limits, timeouts)
//! - `gateway_context`: upstream (API Gateway) identity → request extensions
//! - `auth`: authentication decision → `Identity` in request extensions

pub mod auth;
pub mod gateway_context;
pub mod http;
