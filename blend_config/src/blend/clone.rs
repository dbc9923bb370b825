//! Independent copies of configuration values.

use serde_json::Value;

/// Returns a copy of `value` that shares no structure with its source.
///
/// Sequences, mappings and scalars are all copied deeply, including a
/// sequence passed directly as `value`. Mutating the copy never affects the
/// source and vice versa.
///
/// # Examples
///
/// ```
/// use blend_config::clone_value;
/// use serde_json::json;
///
/// let source = json!({"db": {"hosts": ["a"]}});
/// let mut copy = clone_value(&source);
/// copy["db"]["hosts"][0] = json!("b");
/// assert_eq!(source["db"]["hosts"][0], "a");
/// ```
#[must_use]
pub fn clone_value(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(clone_value).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), clone_value(item)))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}
