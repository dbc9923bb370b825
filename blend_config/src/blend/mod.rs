//! Directive-driven deep merging ("blend").
//!
//! A source mapping is folded into a destination mapping key by key. Each
//! source key may carry a one-character directive choosing how it combines
//! with the value already present:
//!
//! | directive | operator | effect on an existing value |
//! |---|---|---|
//! | `+` | [`Operator::Append`] | extend sequences, merge mappings, join strings, add numbers |
//! | `-` | [`Operator::Remove`] | drop sequence items, delete mappings, strip substrings, subtract numbers |
//! | `?` | [`Operator::SkipIfPresent`] | leave the existing value alone |
//! | `=` | [`Operator::Replace`] | overwrite |
//! | none | [`Operator::Default`] | overwrite, or inherit the ambient operator |
//!
//! Keys missing from the destination are inserted (except under `-`). The
//! destination never receives directive-prefixed keys, with one exception:
//! a `profiles` table is stored verbatim so a profile selected later still
//! blends with its own directives.
//!
//! # Examples
//!
//! ```
//! use blend_config::{Operator, blend};
//! use serde_json::json;
//!
//! let mut config = json!({"tags": ["a"], "retries": 2, "name": "svc"});
//! blend(
//!     &mut config,
//!     &json!({"+tags": ["b"], "+retries": 1, "?name": "other"}),
//!     Operator::Default,
//! );
//! assert_eq!(config, json!({"tags": ["a", "b"], "retries": 3, "name": "svc"}));
//! ```

mod clone;
mod directive;
mod overlay;

pub use clone::clone_value;
pub use directive::{MergeKey, Operator};
pub use overlay::{Overlay, OverlayEntry, OverlayValue};

use serde_json::{Map, Number, Value};
use tracing::trace;

use crate::env::RESERVED_KEY;

/// Magnitude at which an `f64` no longer fits in an `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// What the caller must do with the destination slot after dispatch.
enum Slot {
    Keep,
    Delete,
}

/// Blend `src` into `dest` and return `dest`.
///
/// `src` contributes only when it is a mapping; any other source (including
/// `null`) leaves `dest` untouched. A `dest` that is not a mapping is also
/// returned unchanged, without inspecting `src`. Keys without a directive use
/// `combine` unless it is [`Operator::Default`].
///
/// `src` is never mutated; values copied into `dest` are independent clones.
pub fn blend<'a>(dest: &'a mut Value, src: &Value, combine: Operator) -> &'a mut Value {
    if !dest.is_object() {
        return dest;
    }
    if let Some(overlay) = Overlay::parse(src) {
        blend_overlay(dest, &overlay, combine);
    }
    dest
}

/// Blend an already-parsed [`Overlay`] into `dest` and return `dest`.
///
/// Behaves exactly like [`blend`] for a mapping source.
pub fn blend_overlay<'a>(dest: &'a mut Value, src: &Overlay, combine: Operator) -> &'a mut Value {
    if let Value::Object(map) = dest {
        blend_into_map(map, src, combine);
    }
    dest
}

/// Blend `src` into the mapping `dest`.
pub fn blend_into_map(dest: &mut Map<String, Value>, src: &Overlay, combine: Operator) {
    for entry in src.entries() {
        let property = entry.key().property();
        let op = entry.key().op().or_ambient(combine);
        trace!(property, ?op, "blending entry");

        if property == RESERVED_KEY {
            blend_reserved(dest, entry, op);
            continue;
        }

        let Some(existing) = dest.get_mut(property) else {
            if op != Operator::Remove {
                dest.insert(property.to_owned(), entry.value().materialize());
            }
            continue;
        };

        let slot = match op {
            Operator::SkipIfPresent => Slot::Keep,
            Operator::Append => append(existing, entry.value()),
            Operator::Remove => remove(existing, entry.value()),
            Operator::Replace | Operator::Default => {
                *existing = entry.value().materialize();
                Slot::Keep
            }
        };
        if matches!(slot, Slot::Delete) {
            dest.shift_remove(property);
        }
    }
}

fn append(existing: &mut Value, incoming: &OverlayValue) -> Slot {
    match existing {
        Value::Array(items) => match incoming.as_plain() {
            Some(Value::Array(extra)) => {
                for item in extra {
                    if !items.contains(item) {
                        items.push(clone_value(item));
                    }
                }
            }
            _ => items.push(incoming.materialize()),
        },
        Value::Object(map) => {
            if let OverlayValue::Mapping(overlay) = incoming {
                blend_into_map(map, overlay, Operator::Append);
            }
        }
        Value::String(text) => {
            text.push(' ');
            text.push_str(&text_of(incoming));
        }
        Value::Number(lhs) => {
            if let Some(sum) = number_plus(lhs, incoming) {
                *existing = sum;
            }
        }
        Value::Bool(_) | Value::Null => *existing = incoming.materialize(),
    }
    Slot::Keep
}

fn remove(existing: &mut Value, outgoing: &OverlayValue) -> Slot {
    match existing {
        Value::Array(items) => match outgoing.as_plain() {
            Some(Value::Array(unwanted)) => {
                for item in unwanted {
                    remove_first(items, item);
                }
            }
            _ => remove_first(items, &outgoing.materialize()),
        },
        Value::String(text) => {
            let needle = text_of(outgoing);
            if *text == needle {
                return Slot::Delete;
            }
            if let Some(start) = text.find(&needle) {
                text.replace_range(start..start + needle.len(), "");
            }
        }
        // Only a number can be subtracted from a number.
        Value::Number(lhs) => {
            if let Some(Value::Number(rhs)) = outgoing.as_plain()
                && let Some(difference) = arithmetic(lhs, rhs, Operator::Remove)
            {
                *lhs = difference;
            }
        }
        Value::Object(_) | Value::Bool(_) | Value::Null => return Slot::Delete,
    }
    Slot::Keep
}

/// `+` on a number: numbers add, a string is joined onto the number's text
/// and any other operand replaces it. `None` keeps the number.
fn number_plus(lhs: &Number, incoming: &OverlayValue) -> Option<Value> {
    match incoming.as_plain() {
        Some(Value::Number(rhs)) => arithmetic(lhs, rhs, Operator::Append).map(Value::Number),
        Some(Value::String(suffix)) => Some(Value::String(format!("{lhs}{suffix}"))),
        _ => Some(incoming.materialize()),
    }
}

/// Stores a `profiles` table without resolving its directive keys.
///
/// `+profiles` merges the incoming table into the existing one by raw key;
/// the other operators behave as they do for any mapping.
fn blend_reserved(dest: &mut Map<String, Value>, entry: &OverlayEntry, op: Operator) {
    let property = entry.key().property();
    let raw = entry.value().to_raw();
    let Some(existing) = dest.get_mut(property) else {
        if op != Operator::Remove {
            dest.insert(property.to_owned(), raw);
        }
        return;
    };
    let slot = match (op, existing, raw) {
        (Operator::SkipIfPresent, _, _) => Slot::Keep,
        (Operator::Remove, _, _) => Slot::Delete,
        (Operator::Append, Value::Object(table), Value::Object(extra)) => {
            merge_raw(table, extra);
            Slot::Keep
        }
        (_, slot_value, raw_value) => {
            *slot_value = raw_value;
            Slot::Keep
        }
    };
    if matches!(slot, Slot::Delete) {
        dest.shift_remove(property);
    }
}

fn merge_raw(table: &mut Map<String, Value>, extra: Map<String, Value>) {
    for (key, value) in extra {
        match value {
            Value::Object(more) => match table.get_mut(&key) {
                Some(Value::Object(inner)) => merge_raw(inner, more),
                _ => {
                    table.insert(key, Value::Object(more));
                }
            },
            other => {
                table.insert(key, other);
            }
        }
    }
}

fn remove_first(items: &mut Vec<Value>, needle: &Value) {
    if let Some(pos) = items.iter().position(|item| item == needle) {
        items.remove(pos);
    }
}

/// Text used when a value takes part in string concatenation or stripping.
fn text_of(value: &OverlayValue) -> String {
    match value.materialize() {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Adds or subtracts two numbers, staying integral while the result fits.
///
/// A float result with no fractional part that fits in `i64` is stored as
/// an integer. Returns `None` when the result is not a finite number.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "non-integral configuration numbers are combined as f64 and narrowed once integral"
)]
fn arithmetic(lhs: &Number, rhs: &Number, op: Operator) -> Option<Number> {
    let subtract = op == Operator::Remove;
    if let (Some(a), Some(b)) = (lhs.as_i64(), rhs.as_i64()) {
        let exact = if subtract {
            a.checked_sub(b)
        } else {
            a.checked_add(b)
        };
        if let Some(result) = exact {
            return Some(Number::from(result));
        }
    }
    let (a, b) = (lhs.as_f64()?, rhs.as_f64()?);
    let result = if subtract { a - b } else { a + b };
    if result.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&result) {
        return Some(Number::from(result as i64));
    }
    Number::from_f64(result)
}

#[cfg(test)]
mod tests;
