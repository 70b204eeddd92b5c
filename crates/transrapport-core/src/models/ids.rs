//! Deterministic identifiers.
//!
//! Ids are derived from content so that two runs over the same input
//! produce byte-identical output.

/// Hash `parts` with blake3 and return `<prefix>-<first 16 hex chars>`.
pub fn stable_id(prefix: &str, parts: &[&str]) -> String {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(part.as_bytes());
        // Separator so ("ab", "c") and ("a", "bc") hash differently.
        hasher.update(&[0x1f]);
    }
    let hex = hasher.finalize().to_hex();
    format!("{prefix}-{}", &hex.as_str()[..16])
}
