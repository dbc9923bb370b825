//! Error constructors shared by document loading helpers.

use std::path::Path;
use std::sync::Arc;

use crate::BlendError;

pub(super) fn invalid_data(path: &Path, msg: impl Into<String>) -> Arc<BlendError> {
    Arc::new(BlendError::file(
        path,
        std::io::Error::new(std::io::ErrorKind::InvalidData, msg.into()),
    ))
}

#[cfg(not(feature = "toml"))]
pub(super) fn unsupported(path: &Path, msg: impl Into<String>) -> Arc<BlendError> {
    Arc::new(BlendError::file(
        path,
        std::io::Error::new(std::io::ErrorKind::Unsupported, msg.into()),
    ))
}
