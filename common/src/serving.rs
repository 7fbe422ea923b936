//! Serving-size lookup keys
//!
//! Side dish and carb catalogues bucket their entries by whole servings
//! ("1", "2", ...). Any raw serving size maps onto one of those buckets.

/// Bucket used when the serving size is missing or unparseable
pub const DEFAULT_SERVING_KEY: &str = "1";

/// Floor the serving size, clamp it to at least 1 and render it as a key.
///
/// Never fails: empty, non-numeric or non-finite input yields `"1"`.
///
/// # Examples
/// ```
/// use macrochef_common::resolve_serving_key;
///
/// assert_eq!(resolve_serving_key(Some("4.5")), "4");
/// assert_eq!(resolve_serving_key(Some("0")), "1");
/// assert_eq!(resolve_serving_key(None), "1");
/// ```
pub fn resolve_serving_key(raw: Option<&str>) -> String {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .map(|value| format!("{:.0}", value.floor().max(1.0)))
        .unwrap_or_else(|| DEFAULT_SERVING_KEY.to_string())
}
