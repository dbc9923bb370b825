//! Composition of defaults, documents, profiles and command-line flags.
//!
//! Each source is a provenance-tagged [`ConfigLayer`]. A [`LayerComposer`]
//! folds them with [`crate::blend()`] into a fresh mapping, in this order:
//!
//! 1. defaults
//! 2. package manifest
//! 3. product override documents
//! 4. the selected profile, taken from `profiles.<name>` and recorded
//!    under `profile`
//! 5. command-line assignments
//!
//! The result is an owned [`ComposedConfig`] that callers pass to the
//! expander and the environment flattener.

mod builder;
mod composer;
mod flags;
mod layer;
mod profile;

pub use builder::{ComposerBuilder, PROFILE_ENV};
pub use composer::{ComposedConfig, LayerComposer, PROFILE_KEY};
pub use flags::{flags_layer, parse_assignment};
pub use layer::{ConfigLayer, LayerProvenance};
pub use profile::select_profile;
