//! Overlay documents parsed once at the document boundary.
//!
//! Directive prefixes live in the raw keys of a source mapping. Parsing the
//! mapping into an [`Overlay`] splits every key into a [`MergeKey`] up front
//! so the merge loop never inspects key text again.

use serde_json::{Map, Value};

use super::{MergeKey, Operator, blend_into_map};

/// Value carried by an overlay entry.
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayValue {
    /// The source value was a mapping; its keys carry their own directives.
    Mapping(Overlay),
    /// Any other source value, used verbatim.
    Plain(Value),
}

impl OverlayValue {
    fn parse(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::Mapping(Overlay::from_map(map)),
            other => Self::Plain(other.clone()),
        }
    }

    /// Directive-free value suitable for storing in a destination.
    ///
    /// Nested overlays are applied to an empty mapping, so `-` entries vanish
    /// and the remaining keys lose their prefixes.
    #[must_use]
    pub fn materialize(&self) -> Value {
        match self {
            Self::Mapping(overlay) => Value::Object(overlay.materialize()),
            Self::Plain(value) => super::clone_value(value),
        }
    }

    /// Source value rebuilt with its directive keys intact.
    #[must_use]
    pub fn to_raw(&self) -> Value {
        match self {
            Self::Mapping(overlay) => Value::Object(overlay.to_raw()),
            Self::Plain(value) => super::clone_value(value),
        }
    }

    /// Borrow the plain value, if this entry is not a nested overlay.
    #[must_use]
    pub const fn as_plain(&self) -> Option<&Value> {
        match self {
            Self::Plain(value) => Some(value),
            Self::Mapping(_) => None,
        }
    }
}

/// One `(key, value)` pair of an overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayEntry {
    key: MergeKey,
    value: OverlayValue,
}

impl OverlayEntry {
    /// Parsed key of the entry.
    #[must_use]
    pub const fn key(&self) -> &MergeKey {
        &self.key
    }

    /// Value of the entry.
    #[must_use]
    pub const fn value(&self) -> &OverlayValue {
        &self.value
    }
}

/// A source mapping whose keys have been split into property and operator.
///
/// # Examples
///
/// ```
/// use blend_config::{Operator, Overlay};
/// use serde_json::json;
///
/// let overlay = Overlay::parse(&json!({"+tags": ["b"], "name": "x"}))
///     .expect("mappings parse into overlays");
/// let ops: Vec<_> = overlay.entries().iter().map(|e| e.key().op()).collect();
/// assert_eq!(ops, [Operator::Append, Operator::Default]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlay {
    entries: Vec<OverlayEntry>,
}

impl Overlay {
    /// Parses `src` when it is a mapping; any other value yields `None`.
    #[must_use]
    pub fn parse(src: &Value) -> Option<Self> {
        src.as_object().map(Self::from_map)
    }

    /// Parses every key of `map`, preserving enumeration order.
    #[must_use]
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let entries = map
            .iter()
            .map(|(raw, value)| OverlayEntry {
                key: MergeKey::parse(raw),
                value: OverlayValue::parse(value),
            })
            .collect();
        Self { entries }
    }

    /// Entries in source order.
    #[must_use]
    pub fn entries(&self) -> &[OverlayEntry] {
        &self.entries
    }

    /// Returns `true` when the overlay carries no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry, keeping any earlier entry for the same key.
    pub fn push(&mut self, key: MergeKey, value: Value) {
        self.entries.push(OverlayEntry {
            key,
            value: OverlayValue::parse(&value),
        });
    }

    /// Mapping with every key written back in its prefixed form.
    #[must_use]
    pub fn to_raw(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|entry| (entry.key.to_string(), entry.value.to_raw()))
            .collect()
    }

    /// Directive-free mapping produced by blending the overlay into `{}`.
    #[must_use]
    pub fn materialize(&self) -> Map<String, Value> {
        let mut out = Map::new();
        blend_into_map(&mut out, self, Operator::Default);
        out
    }
}
