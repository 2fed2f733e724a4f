//! Field-by-field merging of configuration tiers.
//!
//! Higher tiers override lower tiers key by key. Lists are replaced, not
//! concatenated.

use serde_json::Value;

/// Deep merge two JSON values, with `overlay` taking precedence over `base`.
///
/// - Objects are merged recursively: keys in overlay override keys in base
/// - Arrays, strings, numbers, booleans are replaced entirely
/// - A null overlay keeps the base value (an empty YAML key means "not set")
///
/// # Example
/// ```
/// use serde_json::json;
/// use data_diff::config::deep_merge;
///
/// let defaults = json!({"log_level": "info", "log_format": "json"});
/// let user = json!({"log_level": "debug", "log_format": null});
/// let merged = deep_merge(defaults, user);
/// assert_eq!(merged, json!({"log_level": "debug", "log_format": "json"}));
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged_value = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged_value);
            }
            Value::Object(base_map)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

/// Merge tiers in order, later tiers taking precedence.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    values.into_iter().fold(Value::Null, deep_merge)
}
