//! 認証判定 → Identity を extensions に入れる
//!
//! - `Authorization` ヘッダ (全部) と上流 (API Gateway) の identity から AuthRequest を組み立てる
//! - 判定そのものは `services::authn::Authenticator` に任せる
//! - 失敗理由はログにだけ出す。クライアントには 401 だけ返す

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::middleware::gateway_context::UpstreamPrincipal;
use crate::services::authn::AuthenticationResult;
use crate::state::AppState;

/// 認証が必要な Router に middleware を適用する。
///
/// 例：
/// ```ignore
/// let v1 = middleware::auth::authn::apply(api::v1::routes(), state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, authn_middleware))
}

async fn authn_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let authenticator = state.authenticator.as_ref();

    // 非 ASCII を含む値も読み飛ばさない (先頭の Bearer が優先される順序を保つ)
    let authorization: Vec<String> = req
        .headers()
        .get_all(header::AUTHORIZATION)
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .collect();

    let upstream = req
        .extensions()
        .get::<UpstreamPrincipal>()
        .map(|p| p.0.clone())
        .unwrap_or_default();

    let auth_request = authenticator
        .request()
        .with_authorization(authorization)
        .with_upstream(upstream);

    match authenticator.authenticate(&auth_request) {
        AuthenticationResult::Success(identity) => {
            tracing::debug!(
                scheme = identity.scheme(),
                claims = identity.claims().len(),
                "request authenticated"
            );
            // middleware → extractor への受け渡し
            req.extensions_mut().insert(identity);
            Ok(next.run(req).await)
        }
        AuthenticationResult::Failure(reason) => {
            tracing::warn!(
                scheme = authenticator.scheme_name(),
                kind = reason.kind(),
                reason = %reason,
                "authentication failed"
            );
            Err(AppError::Unauthorized)
        }
    }
}
