//! Layered configuration composition driven by key directives.
//!
//! The crate folds configuration documents into a single mapping. Keys in a
//! source document may carry a one-character directive (`+`, `-`, `?`, `=`)
//! that decides how the value combines with what earlier layers produced.
//! The composed settings can then expand `${name}` placeholders and be
//! flattened into environment variables for a child process.
//!
//! ```rust
//! use blend_config::compose::LayerComposer;
//! use serde_json::json;
//!
//! let mut composer = LayerComposer::new();
//! composer.push_defaults(json!({"db": {"host": "localhost", "port": 5432}}));
//! composer.push_product(json!({"+db": {"port": 1}, "url": "pg://${host}"}), None);
//!
//! let config = composer.compose()?;
//! assert_eq!(config.get("db.port"), Some(&json!(5433)));
//!
//! let env = blend_config::flatten_env(config.as_map(), &Default::default());
//! assert_eq!(env.get("DB_HOST").map(String::as_str), Some("localhost"));
//! # Ok::<_, std::sync::Arc<blend_config::BlendError>>(())
//! ```

use std::sync::Arc;

pub mod blend;
pub mod compose;
pub mod env;
mod error;
mod file;
mod result_ext;
pub mod template;

pub use blend::{
    MergeKey, Operator, Overlay, OverlayEntry, OverlayValue, blend, blend_into_map,
    blend_overlay, clone_value,
};
pub use env::{build_env, build_env_over, flatten, flatten_env};
pub use error::{AggregatedErrors, BlendError};
pub use file::load_document;
pub use result_ext::{BlendResultExt, FileResultExt};
pub use template::{Context, expand, expand_str};

/// Result type used throughout the crate.
///
/// Errors are shared behind an [`Arc`] so aggregated failures can hold the
/// same error more than once without cloning it.
pub type BlendResult<T> = Result<T, Arc<BlendError>>;
