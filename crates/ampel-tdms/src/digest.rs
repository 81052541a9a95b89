//! Content hashing for dictionary documents.
//!
//! A document is hashed over its canonical text: compact JSON with every
//! object's keys written in byte order, arrays in document order. Entry order
//! therefore matters to the hash while metadata key order does not. The
//! writer orders keys itself rather than relying on the map type serde_json
//! was built with.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Length of the truncated hex hash reported for dictionaries.
pub const SHORT_HASH_LEN: usize = 16;

fn write_canonical(value: &Value, out: &mut String) -> Result<()> {
    match value {
        Value::Object(map) => {
            let mut fields: Vec<(&String, &Value)> = map.iter().collect();
            fields.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
            out.push('{');
            for (i, (key, field)) in fields.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key)?);
                out.push(':');
                write_canonical(field, out)?;
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out)?;
            }
            out.push(']');
        }
        scalar => out.push_str(&serde_json::to_string(scalar)?),
    }
    Ok(())
}

/// Canonical compact JSON text of `value`.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value)?;
    let mut out = String::new();
    write_canonical(&value, &mut out)?;
    Ok(out)
}

/// Full SHA-256 hex digest of the canonical form.
pub fn compute_digest<T: Serialize>(value: &T) -> Result<String> {
    let canonical = canonical_json(value)?;
    Ok(hex::encode(Sha256::digest(canonical.as_bytes())))
}

/// Digest truncated to [`SHORT_HASH_LEN`] hex characters.
pub fn short_digest<T: Serialize>(value: &T) -> Result<String> {
    let mut digest = compute_digest(value)?;
    digest.truncate(SHORT_HASH_LEN);
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_canonical_json_sorts_nested_keys() {
        let input = serde_json::json!({"b": 1, "a": {"z": true, "y": null}});
        assert_eq!(
            canonical_json(&input).expect("canonical"),
            r#"{"a":{"y":null,"z":true},"b":1}"#
        );
    }

    #[test]
    fn test_canonical_json_orders_unsorted_maps() {
        // HashMap iteration order is arbitrary; the output must not be.
        let fields: HashMap<&str, &str> =
            [("value", "Fuel"), ("id", "28"), ("description", "")].into_iter().collect();
        assert_eq!(
            canonical_json(&fields).expect("canonical"),
            r#"{"description":"","id":"28","value":"Fuel"}"#
        );
    }

    #[test]
    fn test_canonical_json_escapes_strings() {
        let input = serde_json::json!({"value": "Standard Practices \u{2014} \"Airframe\""});
        assert_eq!(
            canonical_json(&input).expect("canonical"),
            "{\"value\":\"Standard Practices \u{2014} \\\"Airframe\\\"\"}"
        );
    }

    #[test]
    fn test_canonical_json_array_order_preserved() {
        let a = canonical_json(&serde_json::json!([3, 1, 2])).expect("canonical");
        let b = canonical_json(&serde_json::json!([1, 2, 3])).expect("canonical");
        assert_eq!(a, "[3,1,2]");
        assert_ne!(a, b);
    }

    #[test]
    fn test_short_digest_is_prefix() {
        let input = serde_json::json!({"name": "test"});
        let full = compute_digest(&input).expect("digest");
        let short = short_digest(&input).expect("digest");
        assert_eq!(full.len(), 64);
        assert_eq!(short.len(), SHORT_HASH_LEN);
        assert!(full.starts_with(&short));
        assert!(short.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
