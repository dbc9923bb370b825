//! Aggregation container for several `BlendError` values.

use std::{error::Error, fmt, sync::Arc};

use super::BlendError;

/// Collection of [`BlendError`]s produced during a single composition.
///
/// # Examples
///
/// ```
/// use blend_config::BlendError;
/// let e = BlendError::try_aggregate(vec![
///     BlendError::InvalidFlag { flag: "port".into(), message: "missing '='".into() },
///     BlendError::UnknownProfile { name: "qa".into(), available: "dev".into() },
/// ]);
/// if let Some(BlendError::Aggregate(agg)) = e {
///     assert_eq!(agg.len(), 2);
/// }
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<Arc<BlendError>>);

impl AggregatedErrors {
    /// Create a new aggregation from a vector of errors.
    #[must_use]
    pub const fn new(errors: Vec<Arc<BlendError>>) -> Self {
        Self(errors)
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &BlendError> {
        self.0.iter().map(Arc::as_ref)
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the aggregation holds no errors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {e}", i + 1)?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl IntoIterator for AggregatedErrors {
    type Item = Arc<BlendError>;
    type IntoIter = std::vec::IntoIter<Arc<BlendError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
