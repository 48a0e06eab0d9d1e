//! Identifier normalization for generated file names.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of characters that are not safe in an identifier.
static UNSAFE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());

/// Name returned when nothing safe survives normalization.
pub const FALLBACK_NAME: &str = "unnamed";

/// Canonicalize an arbitrary string into an identifier-safe name.
///
/// Every run of characters outside `[A-Za-z0-9_]` collapses to a single
/// underscore, leading and trailing underscores are stripped and the result
/// is lower-cased. An empty result becomes [`FALLBACK_NAME`].
///
/// ```
/// use malloy_bridge::naming::normalize_name;
///
/// assert_eq!(normalize_name("Order Items!!"), "order_items");
/// assert_eq!(normalize_name("   "), "unnamed");
/// ```
#[must_use]
pub fn normalize_name(value: &str) -> String {
    let replaced = UNSAFE_RUN.replace_all(value, "_");
    let trimmed = replaced.trim_matches('_');
    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_lowercase()
    }
}
