//! JSON object → ordered claim list.
//!
//! Used for both the token payload and the gateway authorizer context, so both
//! identity sources produce claims the same way. Member order is preserved
//! (`serde_json` is built with `preserve_order`).

use serde_json::{Map, Value};

use super::types::Claim;

/// Flatten a JSON object into claims.
///
/// - string → value as-is
/// - array → one claim per element (multi-valued claims)
/// - number / bool → JSON text
/// - null → empty string
/// - object → compact JSON text
pub fn claims_from_json(object: &Map<String, Value>) -> Vec<Claim> {
    let mut claims = Vec::with_capacity(object.len());
    for (claim_type, value) in object {
        match value {
            Value::Array(items) => {
                claims.extend(items.iter().map(|v| Claim::new(claim_type, scalar_text(v))));
            }
            other => claims.push(Claim::new(claim_type, scalar_text(other))),
        }
    }
    claims
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(map) => map,
            _ => unreachable!("test input must be an object"),
        }
    }

    #[test]
    fn keeps_member_order() {
        let claims = claims_from_json(&object(json!({
            "name": "My name",
            "email": "email@any.com",
            "custom-claim": "custom value",
        })));

        let types: Vec<_> = claims.iter().map(|c| c.claim_type.as_str()).collect();
        assert_eq!(types, ["name", "email", "custom-claim"]);
    }

    #[test]
    fn arrays_become_repeated_claims() {
        let claims = claims_from_json(&object(json!({
            "role": ["admin", "reader"],
            "sub": "u-1",
        })));

        assert_eq!(
            claims,
            vec![
                Claim::new("role", "admin"),
                Claim::new("role", "reader"),
                Claim::new("sub", "u-1"),
            ]
        );
    }

    #[test]
    fn non_string_values_use_json_text() {
        let claims = claims_from_json(&object(json!({
            "exp": 1700000000,
            "email_verified": true,
            "middle_name": null,
            "address": {"country": "JP"},
        })));

        assert_eq!(
            claims,
            vec![
                Claim::new("exp", "1700000000"),
                Claim::new("email_verified", "true"),
                Claim::new("middle_name", ""),
                Claim::new("address", r#"{"country":"JP"}"#),
            ]
        );
    }
}
