/*
 * Responsibility
 * - 上流 (API Gateway authorizer) が認証済みにしたユーザー情報の読み取り
 * - ここで作った claims は middleware 経由で UpstreamPrincipal として request extensions に載る
 */
pub mod request_context;

pub use request_context::{REQUEST_CONTEXT_HEADER, RequestContextError, claims_from_request_context};
