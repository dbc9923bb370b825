//! Error types for the `compose-env` demo.
use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while running a `compose-env` command.
#[derive(Debug, Error)]
pub enum ComposeEnvError {
    /// Wraps loading and composition failures from `blend_config`.
    #[error("failed to compose configuration: {0}")]
    Configuration(#[from] Arc<blend_config::BlendError>),
    /// The `--defaults` document does not exist.
    #[error("defaults document not found: {0}")]
    MissingDefaults(Utf8PathBuf),
    /// Serialising the composed configuration failed.
    #[error("failed to render configuration: {0}")]
    Render(#[from] serde_json::Error),
    /// Writing to standard output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result alias used throughout the demo.
pub type Result<T> = std::result::Result<T, ComposeEnvError>;
