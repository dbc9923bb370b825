//! File-backed construction of a [`LayerComposer`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use camino::Utf8PathBuf;
use serde_json::Value;
use tracing::debug;

use super::{ComposedConfig, LayerComposer, flags_layer};
use crate::{BlendError, BlendResult, load_document};

/// Environment variable naming the profile when none is given explicitly.
pub const PROFILE_ENV: &str = "PROFILE";

/// Collects documents, a profile, and command-line assignments, then loads
/// them into a [`LayerComposer`].
///
/// Layers are pushed in a fixed order: defaults, package manifest, product
/// candidates (in the order given), then assignments.
///
/// The profile comes from [`Self::profile`], else a `profile=` assignment,
/// else the `PROFILE` environment variable, else [`Self::default_profile`].
/// The last two are skipped when the documents do not define them.
///
/// ```rust,no_run
/// use blend_config::compose::ComposerBuilder;
/// use serde_json::json;
///
/// let config = ComposerBuilder::new()
///     .defaults(json!({"port": 80}))
///     .package_manifest("package.json")
///     .candidate("config/product.json")
///     .candidate("config/local.toml")
///     .flags(["port=8080"])
///     .compose()?;
/// println!("{}", config.to_value());
/// # Ok::<_, std::sync::Arc<blend_config::BlendError>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ComposerBuilder {
    defaults: Option<Value>,
    package: Option<PathBuf>,
    candidates: Vec<PathBuf>,
    profile: Option<String>,
    default_profile: Option<String>,
    flags: Vec<String>,
}

impl ComposerBuilder {
    /// Create an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            defaults: None,
            package: None,
            candidates: Vec::new(),
            profile: None,
            default_profile: None,
            flags: Vec::new(),
        }
    }

    /// Built-in defaults, applied first.
    #[must_use]
    pub fn defaults(mut self, value: Value) -> Self {
        self.defaults = Some(value);
        self
    }

    /// Package manifest, blended at the root after the defaults.
    #[must_use]
    pub fn package_manifest(mut self, path: impl AsRef<Path>) -> Self {
        self.package = Some(path.as_ref().to_path_buf());
        self
    }

    /// Add one product override document. Absent files are skipped.
    #[must_use]
    pub fn candidate(mut self, path: impl AsRef<Path>) -> Self {
        self.candidates.push(path.as_ref().to_path_buf());
        self
    }

    /// Add several product override documents, in order.
    #[must_use]
    pub fn candidates<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.candidates
            .extend(paths.into_iter().map(|path| path.as_ref().to_path_buf()));
        self
    }

    /// Profile to apply after the documents.
    #[must_use]
    pub fn profile(mut self, name: impl Into<String>) -> Self {
        self.profile = Some(name.into());
        self
    }

    /// Profile to apply when neither the caller, an assignment nor the
    /// `PROFILE` environment variable names one.
    #[must_use]
    pub fn default_profile(mut self, name: impl Into<String>) -> Self {
        self.default_profile = Some(name.into());
        self
    }

    /// Add one `KEY=VALUE` assignment.
    #[must_use]
    pub fn flag(mut self, assignment: impl Into<String>) -> Self {
        self.flags.push(assignment.into());
        self
    }

    /// Add several `KEY=VALUE` assignments, in order.
    #[must_use]
    pub fn flags<I, S>(mut self, assignments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags.extend(assignments.into_iter().map(Into::into));
        self
    }

    /// Load every document and assignment into a [`LayerComposer`].
    ///
    /// # Errors
    ///
    /// Returns the single failure, or [`BlendError::Aggregate`] listing every
    /// unreadable document and malformed assignment.
    pub fn build(self) -> BlendResult<LayerComposer> {
        let mut composer = LayerComposer::with_capacity(self.candidates.len() + 3);
        let mut errors: Vec<Arc<BlendError>> = Vec::new();

        if let Some(defaults) = self.defaults {
            composer.push_defaults(defaults);
        }
        if let Some(path) = self.package.as_deref() {
            match load_document(path) {
                Ok(Some(manifest)) => {
                    composer.push_package(Value::Object(manifest), Some(utf8(path)));
                }
                Ok(None) => debug!(path = %path.display(), "package manifest absent"),
                Err(err) => errors.push(err),
            }
        }
        for path in &self.candidates {
            match load_document(path) {
                Ok(Some(doc)) => composer.push_file(Value::Object(doc), utf8(path)),
                Ok(None) => debug!(path = %path.display(), "skipping absent candidate"),
                Err(err) => errors.push(err),
            }
        }
        if !self.flags.is_empty() {
            match flags_layer(&self.flags) {
                Ok(layer) => composer.push_cli(layer),
                Err(err) => errors.push(err),
            }
        }
        if let Some(name) = self.profile {
            composer.select_profile(name);
        }
        let from_env = std::env::var(PROFILE_ENV)
            .ok()
            .filter(|name| !name.is_empty());
        if let Some(name) = from_env.or(self.default_profile) {
            composer.set_fallback_profile(name);
        }

        match BlendError::try_aggregate(errors) {
            Some(err) => Err(Arc::new(err)),
            None => Ok(composer),
        }
    }

    /// Shorthand for [`Self::build`] followed by [`LayerComposer::compose`].
    ///
    /// # Errors
    ///
    /// Propagates failures from either step.
    pub fn compose(self) -> BlendResult<ComposedConfig> {
        self.build()?.compose()
    }
}

fn utf8(path: &Path) -> Utf8PathBuf {
    Utf8PathBuf::from(path.to_string_lossy().into_owned())
}
