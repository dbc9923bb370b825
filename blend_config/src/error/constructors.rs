//! Constructors and aggregation helpers for `BlendError`.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use super::{AggregatedErrors, BlendError};

impl BlendError {
    /// Tries to build a [`BlendError`] from an iterator of errors.
    ///
    /// Returns `None` for an empty iterator, the inner error when a single
    /// uniquely owned error is supplied, and [`Self::Aggregate`] otherwise.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut arcs: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        if arcs.is_empty() {
            return None;
        }
        Some(if arcs.len() == 1 {
            let last = arcs.pop()?;
            match Arc::try_unwrap(last) {
                Ok(err) => err,
                Err(shared) => Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared]))),
            }
        } else {
            Self::Aggregate(Box::new(AggregatedErrors::new(arcs)))
        })
    }

    /// Construct a [`BlendError::File`] for `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blend_config::BlendError;
    /// let io = std::io::Error::other("disk on fire");
    /// let e = BlendError::file("app.json", io);
    /// assert!(e.to_string().contains("app.json"));
    /// ```
    #[must_use]
    pub fn file(path: impl AsRef<Path>, source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::File {
            path: path.as_ref().to_path_buf(),
            source: source.into(),
        }
    }

    /// Construct a [`BlendError::InvalidFlag`] wrapped in an [`Arc`].
    #[must_use]
    pub fn invalid_flag(flag: impl Into<String>, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::InvalidFlag {
            flag: flag.into(),
            message: message.into(),
        })
    }

    /// Construct a gathering error from a [`figment::Error`].
    #[must_use]
    pub fn gathering(source: figment::Error) -> Self {
        Self::Gathering(Box::new(source))
    }
}
