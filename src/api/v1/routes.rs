/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - ここに並ぶ route は全て認証必須 (app 側で auth middleware を掛ける)
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::me::me;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}
