//! Environment-variable views of a configuration mapping.
//!
//! [`flatten`] turns nested settings into upper-case, underscore-joined
//! names; [`build_env`] expands those values and lays them over the process
//! environment so the result can be handed to a child process.
//!
//! ```
//! use blend_config::env::flatten;
//! use serde_json::json;
//!
//! let config = json!({"db": {"host": "x", "profiles": {"dev": 1}}});
//! let flat = config
//!     .as_object()
//!     .map(|map| flatten(map, ""))
//!     .unwrap_or_default();
//! assert_eq!(serde_json::Value::Object(flat), json!({"DB_HOST": "x"}));
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::template::{Context, expand, render};

/// Key excluded from flattening at every depth.
pub const RESERVED_KEY: &str = "profiles";

/// Flattens `entries` into environment-variable names under `prefix`.
///
/// Nested mappings extend the prefix with `KEY_`; sequences do the same with
/// their indices. Scalars emit `UPPER(prefix + key)` with `.` and `-`
/// replaced by `_`. `null` values and any key named `profiles` are skipped.
#[must_use]
pub fn flatten<'a, I>(entries: I, prefix: &str) -> Map<String, Value>
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    let mut out = Map::new();
    for (key, value) in entries {
        flatten_entry(&mut out, prefix, key, value);
    }
    out
}

fn flatten_entry(out: &mut Map<String, Value>, prefix: &str, key: &str, value: &Value) {
    if key == RESERVED_KEY {
        return;
    }
    match value {
        Value::Object(map) => {
            let nested = nested_prefix(prefix, key);
            for (child, item) in map {
                flatten_entry(out, &nested, child, item);
            }
        }
        Value::Array(items) => {
            let nested = nested_prefix(prefix, key);
            for (index, item) in items.iter().enumerate() {
                flatten_entry(out, &nested, &index.to_string(), item);
            }
        }
        Value::Null => {}
        Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            out.insert(variable_name(prefix, key), value.clone());
        }
    }
}

fn nested_prefix(prefix: &str, key: &str) -> String {
    format!("{prefix}{}_", key.to_uppercase())
}

fn variable_name(prefix: &str, key: &str) -> String {
    format!("{prefix}{key}").to_uppercase().replace(['.', '-'], "_")
}

/// Flattens `mapping` and expands every value against `context`.
#[must_use]
pub fn flatten_env(mapping: &Map<String, Value>, context: &Context) -> BTreeMap<String, String> {
    flatten(mapping, "")
        .into_iter()
        .map(|(key, value)| (key, render(&expand(&value, &[context]))))
        .collect()
}

/// Builds a child-process environment from the current process environment.
///
/// Flattened configuration keys win over inherited variables of the same
/// name. Non-UTF-8 inherited names and values are converted lossily.
#[must_use]
pub fn build_env(mapping: &Map<String, Value>, context: &Context) -> BTreeMap<String, String> {
    let inherited = std::env::vars_os().map(|(key, value)| {
        (
            key.to_string_lossy().into_owned(),
            value.to_string_lossy().into_owned(),
        )
    });
    build_env_over(mapping, context, inherited)
}

/// Builds an environment on top of an explicit `base` instead of the
/// process environment.
///
/// # Examples
///
/// ```
/// use blend_config::env::build_env_over;
/// use blend_config::template::Context;
/// use serde_json::json;
///
/// let config = json!({"app": {"url": "http://${host}"}, "path": "/opt"});
/// let mut context = Context::new();
/// context.insert("host".into(), "example.org".into());
///
/// let env = build_env_over(
///     config.as_object().unwrap_or(&Default::default()),
///     &context,
///     [("PATH", "/usr/bin"), ("HOME", "/root")],
/// );
/// assert_eq!(env.get("APP_URL").map(String::as_str), Some("http://example.org"));
/// assert_eq!(env.get("PATH").map(String::as_str), Some("/opt"));
/// assert_eq!(env.get("HOME").map(String::as_str), Some("/root"));
/// ```
#[must_use]
pub fn build_env_over<I, K, V>(
    mapping: &Map<String, Value>,
    context: &Context,
    base: I,
) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut env: BTreeMap<String, String> = base
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect();
    for (key, value) in flatten_env(mapping, context) {
        if let Some(previous) = env.get(&key).filter(|previous| **previous != value) {
            debug!(variable = %key, %previous, "configuration overrides inherited variable");
        }
        env.insert(key, value);
    }
    env
}
