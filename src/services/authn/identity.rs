use super::types::{Claim, Identity};

/// Wrap claims into an [`Identity`] tagged with `scheme`. Order is kept as given.
pub fn build_identity<I>(claims: I, scheme: &str) -> Identity
where
    I: IntoIterator<Item = Claim>,
{
    Identity::new(scheme, claims.into_iter().collect())
}
