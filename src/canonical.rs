//! Canonical JSON encoding.
//!
//! The signature is computed over these bytes and an independent verifier
//! recomputes them from the same logical payload, so the serialization must
//! be a pure function of the key/value pairs: keys in byte-wise ascending
//! order, no insignificant whitespace, UTF-8 output.

use std::collections::BTreeMap;

use crate::Result;

/// Serializes a string-to-string map as canonical JSON bytes.
///
/// Members are ordered by the map itself (`BTreeMap` iterates keys in
/// byte-wise ascending order) and rendered compactly as `"key":"value"`
/// with standard JSON escaping. No locale-aware collation, no trailing
/// newline, no whitespace outside string content.
pub fn encode(map: &BTreeMap<&str, &str>) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(map)?)
}
