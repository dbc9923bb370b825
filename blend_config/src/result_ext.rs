//! Extensions for mapping errors to `BlendResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(e.into()))`
//! patterns when converting external error types into the crate's
//! `BlendResult<T>` alias (`Result<T, Arc<BlendError>>`).
//!
//! # Examples
//!
//! ```
//! use blend_config::{BlendError, BlendResult, BlendResultExt};
//!
//! fn gather() -> BlendResult<u16> {
//!     Err(figment::Error::from("missing field `port`")).into_blend()
//! }
//! let err = gather().err();
//! assert!(matches!(err.as_deref(), Some(BlendError::Gathering(_))));
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::{BlendError, BlendResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<BlendError>`
/// into a `BlendResult<T>`.
pub trait BlendResultExt<T> {
    /// Convert `Result<T, E>` into `BlendResult<T>` using `Into<BlendError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<BlendError>`.
    fn into_blend(self) -> BlendResult<T>;
}

impl<T, E> BlendResultExt<T> for Result<T, E>
where
    E: Into<BlendError>,
{
    fn into_blend(self) -> BlendResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}

/// Extension attributing any failure to a configuration document.
pub trait FileResultExt<T> {
    /// Convert the error into [`BlendError::File`] for `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`BlendError::File`] wrapped in `Arc` when the input is `Err`.
    fn for_file(self, path: &Path) -> BlendResult<T>;
}

impl<T, E> FileResultExt<T> for Result<T, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn for_file(self, path: &Path) -> BlendResult<T> {
        self.map_err(|e| Arc::new(BlendError::file(path, e)))
    }
}
