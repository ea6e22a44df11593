//! Display-name normalization for cross-catalog comparison.
//!
//! Catalogs disagree on casing and separators ("Claude-Sonnet-4.5" vs
//! "claude-sonnet-4-5"); normalization lines them up without ever guessing.

/// Characters treated as interchangeable separators across catalogs.
const SEPARATORS: [char; 5] = [' ', '_', '.', ':', '+'];

/// Normalize a display identifier: case-fold, map separator characters to
/// `-`, collapse separator runs. Pure and deterministic.
pub fn normalize_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        let mapped = if SEPARATORS.contains(&ch) { '-' } else { ch };
        if mapped == '-' && out.ends_with('-') {
            continue;
        }
        out.push(mapped);
    }
    out
}

/// Split a `vendor/key` composite into its vendor segment and bare key.
/// Keys without a vendor segment return `(None, key)`.
pub fn split_vendor(key: &str) -> (Option<&str>, &str) {
    match key.split_once('/') {
        Some((vendor, rest)) if !vendor.is_empty() && !rest.is_empty() => (Some(vendor), rest),
        _ => (None, key),
    }
}
