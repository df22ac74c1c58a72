/*
 * Responsibility
 * - GET /api/v1/me
 * - middleware が確定させた Identity をそのまま返す (誰として認証されたかの確認用)
 */
use axum::Json;

use crate::api::v1::dto::identity::IdentityResponse;
use crate::api::v1::extractors::AuthIdentity;

pub async fn me(AuthIdentity(identity): AuthIdentity) -> Json<IdentityResponse> {
    Json(IdentityResponse::from(&identity))
}
