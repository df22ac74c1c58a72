/*!
 * Authenticated identity extractor
 *
 * Responsibility:
 * - 認証済みリクエストの Identity を handler に提供する
 * - 判定ロジックは services::authn、ここは受け渡しだけ
 */

mod core;

pub use self::core::AuthIdentity;
