//! Fingerprinting - SHA-256 over Canonical JSON
//!
//! Lets consumers key cached style sheets on the exact rules that produced
//! a tag sequence.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Hex-encoded SHA-256 of bytes
pub fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data).iter().fold(String::with_capacity(64), |mut out, b| {
        let _ = write!(out, "{:02x}", b);
        out
    })
}

/// Serialize with object keys sorted at every depth and no whitespace
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut v = serde_json::to_value(value)?;
    sort_keys(&mut v);
    serde_json::to_string(&v)
}

fn sort_keys(v: &mut Value) {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            for (key, mut child) in entries {
                sort_keys(&mut child);
                map.insert(key, child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(sort_keys),
        _ => {}
    }
}

/// Fingerprint of any serializable value
pub fn fingerprint<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(sha256_hex(canonical_json(value)?.as_bytes()))
}
