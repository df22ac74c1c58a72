//! Bearer token → claims, WITHOUT signature verification.
//!
//! This exists for local runs where no gateway authorizer sits in front of the
//! service. A successful decode says nothing about who issued the token.
//! Hosts that need verification can plug their own [`ClaimsDecoder`].

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::Value;

use super::claims::claims_from_json;
use super::types::Claim;

// base64url; tokens in the wild show up both with and without padding.
const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("expected 3 token segments, found {0}")]
    SegmentCount(usize),
    #[error("invalid base64url in token {segment}: {source}")]
    Base64 {
        segment: &'static str,
        #[source]
        source: base64::DecodeError,
    },
    #[error("invalid json in token {segment}: {source}")]
    Json {
        segment: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("token {0} is not a json object")]
    NotAnObject(&'static str),
}

/// Turns a raw token into its claim list.
pub trait ClaimsDecoder: Send + Sync {
    fn decode(&self, token: &str) -> Result<Vec<Claim>, DecodeError>;
}

/// Reads the payload of a compact JWS (`header.payload.signature`).
///
/// The signature segment is ignored and may be empty (`alg: none` tokens).
#[derive(Debug, Clone, Copy, Default)]
pub struct UnverifiedJwtDecoder;

impl ClaimsDecoder for UnverifiedJwtDecoder {
    fn decode(&self, token: &str) -> Result<Vec<Claim>, DecodeError> {
        let segments: Vec<&str> = token.split('.').collect();
        let [header, payload, _signature] = segments[..] else {
            return Err(DecodeError::SegmentCount(segments.len()));
        };

        // The header carries nothing we use, but a token whose header is garbage is malformed.
        decode_object(header, "header")?;
        let payload = decode_object(payload, "payload")?;

        Ok(claims_from_json(&payload))
    }
}

fn decode_object(
    segment: &str,
    name: &'static str,
) -> Result<serde_json::Map<String, Value>, DecodeError> {
    let bytes = SEGMENT_ENGINE
        .decode(segment)
        .map_err(|source| DecodeError::Base64 {
            segment: name,
            source,
        })?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(DecodeError::NotAnObject(name)),
        Err(source) => Err(DecodeError::Json {
            segment: name,
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
    use serde_json::json;

    fn segment(v: &Value) -> String {
        URL_SAFE_NO_PAD.encode(v.to_string())
    }

    fn unsigned_token(payload: Value) -> String {
        format!("{}.{}.", segment(&json!({"alg": "none"})), segment(&payload))
    }

    #[test]
    fn decodes_payload_claims_in_order() {
        let token = unsigned_token(json!({
            "name": "My name",
            "email": "email@any.com",
            "custom-claim": "custom value",
        }));

        let claims = UnverifiedJwtDecoder.decode(&token).unwrap();
        assert_eq!(
            claims,
            vec![
                Claim::new("name", "My name"),
                Claim::new("email", "email@any.com"),
                Claim::new("custom-claim", "custom value"),
            ]
        );
    }

    #[test]
    fn ignores_signature_content() {
        let header = segment(&json!({"alg": "RS256", "typ": "JWT"}));
        let payload = segment(&json!({"sub": "u-1"}));
        let token = format!("{header}.{payload}.not-a-real-signature");

        let claims = UnverifiedJwtDecoder.decode(&token).unwrap();
        assert_eq!(claims, vec![Claim::new("sub", "u-1")]);
    }

    #[test]
    fn accepts_padded_segments() {
        let header = URL_SAFE.encode(json!({"alg": "none"}).to_string());
        let payload = URL_SAFE.encode(json!({"sub": "u"}).to_string());
        let token = format!("{header}.{payload}.");

        assert!(payload.ends_with('=') || header.ends_with('='));
        assert_eq!(
            UnverifiedJwtDecoder.decode(&token).unwrap(),
            vec![Claim::new("sub", "u")]
        );
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert!(matches!(
            UnverifiedJwtDecoder.decode("abc"),
            Err(DecodeError::SegmentCount(1))
        ));
        assert!(matches!(
            UnverifiedJwtDecoder.decode("a.b.c.d.e"),
            Err(DecodeError::SegmentCount(5))
        ));
    }

    #[test]
    fn rejects_invalid_base64() {
        let header = segment(&json!({"alg": "none"}));
        let token = format!("{header}.***.");

        assert!(matches!(
            UnverifiedJwtDecoder.decode(&token),
            Err(DecodeError::Base64 {
                segment: "payload",
                ..
            })
        ));
    }

    #[test]
    fn rejects_invalid_json() {
        let header = segment(&json!({"alg": "none"}));
        let payload = URL_SAFE_NO_PAD.encode("{not json");
        let token = format!("{header}.{payload}.");

        assert!(matches!(
            UnverifiedJwtDecoder.decode(&token),
            Err(DecodeError::Json {
                segment: "payload",
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_object_header() {
        let header = segment(&json!(["alg", "none"]));
        let payload = segment(&json!({"sub": "u"}));
        let token = format!("{header}.{payload}.");

        assert!(matches!(
            UnverifiedJwtDecoder.decode(&token),
            Err(DecodeError::NotAnObject("header"))
        ));
    }
}
