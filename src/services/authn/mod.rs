/*
 * Responsibility
 * - 「このリクエストは誰か」を決める認証判定のコア
 * - HTTP / axum には依存しない (middleware 側が AuthRequest を組み立てて渡す)
 * - 認可 (権限判定) はここでは扱わない
 */
pub mod authenticator;
pub mod bearer;
pub mod claims;
pub mod error;
pub mod identity;
pub mod policy;
pub mod resolver;
pub mod token_decoder;
pub mod types;

pub use authenticator::Authenticator;
pub use error::AuthFailure;
pub use policy::{AuthVariant, PolicyOptions};
pub use token_decoder::{ClaimsDecoder, DecodeError, UnverifiedJwtDecoder};
pub use types::{AuthRequest, AuthenticationResult, Claim, Identity};
