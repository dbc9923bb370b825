//! Directive prefixes carried by overlay keys.

use std::fmt;

/// How an overlay entry combines with the value already in the destination.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Operator {
    /// No directive: replace, unless an ambient operator is inherited.
    #[default]
    Default,
    /// `+`: concatenate, add, or extend.
    Append,
    /// `-`: subtract, strip, or delete.
    Remove,
    /// `?`: only write when the destination lacks the key.
    SkipIfPresent,
    /// `=`: overwrite unconditionally.
    Replace,
}

impl Operator {
    /// Maps a directive character to its operator.
    #[must_use]
    pub const fn from_directive(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Append),
            '-' => Some(Self::Remove),
            '?' => Some(Self::SkipIfPresent),
            '=' => Some(Self::Replace),
            _ => None,
        }
    }

    /// The directive character for this operator, if it has one.
    #[must_use]
    pub const fn directive(self) -> Option<char> {
        match self {
            Self::Default => None,
            Self::Append => Some('+'),
            Self::Remove => Some('-'),
            Self::SkipIfPresent => Some('?'),
            Self::Replace => Some('='),
        }
    }

    /// Resolves the operator for a directive-less key under `combine`.
    #[must_use]
    pub const fn or_ambient(self, combine: Self) -> Self {
        match self {
            Self::Default => combine,
            explicit => explicit,
        }
    }
}

/// A source key split into its target property and operator.
///
/// # Examples
///
/// ```
/// use blend_config::{MergeKey, Operator};
///
/// let key = MergeKey::parse("+tags");
/// assert_eq!(key.property(), "tags");
/// assert_eq!(key.op(), Operator::Append);
///
/// let plain = MergeKey::parse("tags");
/// assert_eq!(plain.op(), Operator::Default);
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MergeKey {
    property: String,
    op: Operator,
}

impl MergeKey {
    /// Builds a key from an already-separated property and operator.
    #[must_use]
    pub fn new(property: impl Into<String>, op: Operator) -> Self {
        Self {
            property: property.into(),
            op,
        }
    }

    /// Strips at most one leading directive character from `raw`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut chars = raw.chars();
        match chars.next().and_then(Operator::from_directive) {
            Some(op) => Self::new(chars.as_str(), op),
            None => Self::new(raw, Operator::Default),
        }
    }

    /// Destination property the entry targets.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Operator written on the key (before ambient resolution).
    #[must_use]
    pub const fn op(&self) -> Operator {
        self.op
    }
}

impl fmt::Display for MergeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ch) = self.op.directive() {
            write!(f, "{ch}")?;
        }
        f.write_str(&self.property)
    }
}
