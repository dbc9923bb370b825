//! `${name}` placeholder substitution over configuration values.
//!
//! Placeholders may appear in any string of a value tree, mapping keys
//! included. Each context is applied in turn, so a placeholder left
//! unresolved by one context can still be filled by a later one:
//!
//! ```
//! use blend_config::template::{Context, expand};
//! use serde_json::json;
//!
//! let settings: Context = json!({"a": "1"}).as_object().cloned().unwrap_or_default();
//! let global: Context = json!({"b": "2"}).as_object().cloned().unwrap_or_default();
//! assert_eq!(expand(&json!("${a}-${b}"), &[&settings, &global]), json!("1-2"));
//! ```
//!
//! Only bare identifiers are looked up. Anything else between the braces is
//! kept verbatim, as is any name no context defines.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

/// Variables available to placeholder lookup.
pub type Context = Map<String, Value>;

#[expect(
    clippy::expect_used,
    reason = "the placeholder pattern is a compile-time constant"
)]
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]*)\}").expect("placeholder pattern compiles"));

/// Substitutes placeholders throughout `value`, one context at a time.
///
/// `value` and the contexts are left untouched; the expanded copy is
/// returned.
#[must_use]
pub fn expand(value: &Value, contexts: &[&Context]) -> Value {
    contexts
        .iter()
        .fold(crate::clone_value(value), |acc, context| {
            expand_value(acc, context)
        })
}

/// String form of [`expand`], used for argument lists and single settings.
///
/// # Examples
///
/// ```
/// use blend_config::template::{Context, expand_str};
///
/// let mut context = Context::new();
/// context.insert("region".into(), "eu-west-1".into());
/// assert_eq!(
///     expand_str("--region=${region} ${profile}", &[&context]),
///     "--region=eu-west-1 ${profile}"
/// );
/// ```
#[must_use]
pub fn expand_str(text: &str, contexts: &[&Context]) -> String {
    contexts
        .iter()
        .fold(text.to_owned(), |acc, context| {
            substitute(&acc, context).into_owned()
        })
}

fn expand_value(value: Value, context: &Context) -> Value {
    match value {
        Value::String(text) => Value::String(substitute(&text, context).into_owned()),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| expand_value(item, context))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| {
                    (
                        substitute(&key, context).into_owned(),
                        expand_value(item, context),
                    )
                })
                .collect(),
        ),
        scalar @ (Value::Null | Value::Bool(_) | Value::Number(_)) => scalar,
    }
}

/// Replaces every resolvable placeholder in `text` with its rendered value.
///
/// Substituted text is not scanned again against the same context.
fn substitute<'a>(text: &'a str, context: &Context) -> Cow<'a, str> {
    PLACEHOLDER.replace_all(text, |caps: &Captures<'_>| {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        caps.get(1)
            .map(|m| m.as_str().trim())
            .filter(|name| is_identifier(name))
            .and_then(|name| context.get(name))
            .map_or_else(|| whole.to_owned(), render)
    })
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || matches!(first, '_' | '$'))
        && chars.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '$'))
}

/// Text inserted for a resolved placeholder.
pub(crate) fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
