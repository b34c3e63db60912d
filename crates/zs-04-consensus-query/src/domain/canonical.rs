//! # Canonical Digests
//!
//! Two sharders that return the same document with fields in a different
//! order must land in the same tally bucket. Bodies are parsed, re-emitted
//! with sorted keys, and hashed; the original bytes are never hashed when
//! they parse as JSON.

use serde_json::Value;
use shared_crypto::sha1_digest;

/// Deterministic compact JSON with object keys sorted at every level.
pub fn canonical_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let fields: Vec<String> = keys
                .into_iter()
                .map(|k| format!("{}:{}", Value::String(k.clone()), canonical_json(&map[k])))
                .collect();
            format!("{{{}}}", fields.join(","))
        }
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        other => other.to_string(),
    }
}

/// SHA-1 over the canonical form of `body`.
///
/// A top-level object is flattened to `key:value` pairs in key order joined
/// with `:`. Any other JSON is hashed in canonical form; non-JSON bodies are
/// hashed trimmed.
pub fn canonical_digest(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let joined = keys
                .into_iter()
                .map(|k| format!("{}:{}", k, canonical_json(&map[k])))
                .collect::<Vec<_>>()
                .join(":");
            sha1_digest(joined)
        }
        Ok(other) => sha1_digest(canonical_json(&other)),
        Err(_) => sha1_digest(body.trim()),
    }
}
