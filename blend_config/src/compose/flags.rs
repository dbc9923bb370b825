//! Command-line `KEY=VALUE` assignments as a source layer.
//!
//! Keys use dots to reach nested settings. Intermediate segments merge into
//! the existing mapping and the final segment replaces its value, unless a
//! segment spells out its own directive:
//!
//! | flag | source mapping |
//! |---|---|
//! | `port=8080` | `{"=port": 8080}` |
//! | `db.host=x` | `{"+db": {"=host": "x"}}` |
//! | `+tags=beta` | `{"+tags": "beta"}` |
//! | `db.-replicas=1` | `{"+db": {"-replicas": 1}}` |
//!
//! Values are parsed as JSON when they form a valid JSON document and are
//! otherwise taken as plain strings.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::blend::{MergeKey, Operator};
use crate::{BlendError, BlendResult};

/// Split one `KEY=VALUE` assignment into its key and parsed value.
///
/// A leading directive belongs to the key, so `=port=80` assigns `80` to
/// `=port`.
///
/// # Errors
///
/// Returns [`BlendError::InvalidFlag`] when the `=` separator or the key is
/// missing.
pub fn parse_assignment(raw: &str) -> BlendResult<(String, Value)> {
    let directive_len = raw
        .chars()
        .next()
        .filter(|ch| Operator::from_directive(*ch).is_some())
        .map_or(0, char::len_utf8);
    let (head, rest) = raw.split_at(directive_len);
    let Some((name, text)) = rest.split_once('=') else {
        return Err(BlendError::invalid_flag(raw, "expected KEY=VALUE"));
    };
    if name.trim().is_empty() {
        return Err(BlendError::invalid_flag(raw, "missing key before '='"));
    }
    Ok((format!("{head}{}", name.trim()), parse_value(text)))
}

fn parse_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

/// Build a source mapping from a list of assignments.
///
/// Every malformed assignment is reported; several failures are returned as
/// [`BlendError::Aggregate`].
///
/// # Examples
///
/// ```
/// use blend_config::compose::flags_layer;
/// use serde_json::json;
///
/// let layer = flags_layer(["db.port=5433", "+tags=beta", "debug=true"])?;
/// assert_eq!(
///     layer,
///     json!({"+db": {"=port": 5433}, "+tags": "beta", "=debug": true})
/// );
/// # Ok::<_, std::sync::Arc<blend_config::BlendError>>(())
/// ```
///
/// # Errors
///
/// Returns [`BlendError::InvalidFlag`] for malformed assignments, empty path
/// segments, or a key assigned both a value and nested keys.
pub fn flags_layer<I, S>(assignments: I) -> BlendResult<Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut root = Map::new();
    let mut errors = Vec::new();
    for assignment in assignments {
        let raw = assignment.as_ref();
        let outcome = parse_assignment(raw).and_then(|(key, value)| {
            insert_path(&mut root, &key, value)
                .map_err(|message| BlendError::invalid_flag(raw, message))
        });
        if let Err(err) = outcome {
            errors.push(err);
        }
    }
    match BlendError::try_aggregate(errors) {
        Some(err) => Err(Arc::new(err)),
        None => Ok(Value::Object(root)),
    }
}

fn insert_path(root: &mut Map<String, Value>, key: &str, value: Value) -> Result<(), String> {
    let segments: Vec<&str> = key.split('.').collect();
    if segments.iter().any(|segment| MergeKey::parse(segment).property().is_empty()) {
        return Err(String::from("empty path segment"));
    }
    let Some((leaf, parents)) = segments.split_last() else {
        return Err(String::from("empty key"));
    };

    let mut cursor = root;
    for segment in parents {
        let leaf_form = leaf_key(segment);
        let branch_form = branch_key(segment);
        if leaf_form != branch_form && cursor.contains_key(&leaf_form) {
            return Err(format!("'{segment}' is assigned both a value and nested keys"));
        }
        let slot = cursor
            .entry(branch_form)
            .or_insert_with(|| Value::Object(Map::new()));
        cursor = match slot {
            Value::Object(map) => map,
            _ => return Err(format!("'{segment}' is assigned both a value and nested keys")),
        };
    }

    if cursor.get(&branch_key(leaf)).is_some_and(Value::is_object) {
        return Err(format!("'{leaf}' is assigned both a value and nested keys"));
    }
    cursor.insert(leaf_key(leaf), value);
    Ok(())
}

fn with_default_directive(segment: &str, directive: char) -> String {
    let key = MergeKey::parse(segment);
    if key.op() == Operator::Default {
        format!("{directive}{segment}")
    } else {
        segment.to_owned()
    }
}

fn branch_key(segment: &str) -> String {
    with_default_directive(segment, '+')
}

fn leaf_key(segment: &str) -> String {
    with_default_directive(segment, '=')
}
