//! `Authorization` header → bearer token.
//!
//! The prefix check is a plain `starts_with("Bearer")`. There is no boundary
//! check after the scheme, so `"Bearerabc"` yields `"abc"`. Callers and tests
//! rely on this exact behavior.

pub const BEARER_PREFIX: &str = "Bearer";

/// Return the token from the first header value that starts with `Bearer`.
///
/// Absence is a normal outcome (`None`), never an error.
pub fn extract_bearer_token<I, S>(values: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for value in values {
        let value = value.as_ref();
        if let Some(rest) = value.strip_prefix(BEARER_PREFIX) {
            let token = rest.trim();
            // Only the first matching header counts, even if it is empty.
            return if token.is_empty() {
                None
            } else {
                Some(token.to_string())
            };
        }
    }
    None
}
