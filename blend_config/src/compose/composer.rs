//! Ordered fold of configuration layers.

use std::borrow::Cow;
use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value};
use tracing::debug;

use super::{ConfigLayer, LayerProvenance, select_profile};
use crate::blend::{MergeKey, Operator, Overlay, blend_into_map};
use crate::template::{Context, expand, expand_str};
use crate::{BlendResult, build_env};

/// Setting that names the applied profile; a CLI assignment to it selects
/// the profile.
pub const PROFILE_KEY: &str = "profile";

/// Builder that accumulates [`ConfigLayer`] instances.
///
/// Layers are blended in the order they were pushed. The selected profile
/// is applied after the last non-CLI layer, so command-line assignments
/// always have the final word. Its name is then recorded under `profile`.
///
/// A profile is chosen by [`Self::select_profile`], else by a CLI
/// `profile=` assignment, else by [`Self::set_fallback_profile`]. The first
/// two must exist; a fallback naming an undefined profile is skipped.
///
/// ```rust
/// use blend_config::compose::LayerComposer;
/// use serde_json::json;
///
/// let mut composer = LayerComposer::new();
/// composer.push_defaults(json!({"port": 80, "tags": ["base"]}));
/// composer.push_product(json!({"+tags": ["web"]}), None);
/// composer.push_cli(json!({"=port": 8080}));
///
/// let config = composer.compose()?;
/// assert_eq!(config.get("port"), Some(&json!(8080)));
/// assert_eq!(config.get("tags"), Some(&json!(["base", "web"])));
/// # Ok::<_, std::sync::Arc<blend_config::BlendError>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct LayerComposer {
    layers: Vec<ConfigLayer<'static>>,
    profile: Option<String>,
    fallback_profile: Option<String>,
}

impl LayerComposer {
    /// Create an empty composer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            layers: Vec::new(),
            profile: None,
            fallback_profile: None,
        }
    }

    /// Create a composer with preallocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            layers: Vec::with_capacity(capacity),
            profile: None,
            fallback_profile: None,
        }
    }

    /// Push a defaults layer.
    pub fn push_defaults(&mut self, value: Value) {
        self.push_layer(ConfigLayer::defaults(Cow::Owned(value)));
    }

    /// Push a package metadata layer.
    pub fn push_package(&mut self, value: Value, path: Option<Utf8PathBuf>) {
        self.push_layer(ConfigLayer::new(
            LayerProvenance::Package,
            Cow::Owned(value),
            path,
        ));
    }

    /// Push a product override layer.
    pub fn push_product(&mut self, value: Value, path: Option<Utf8PathBuf>) {
        self.push_layer(ConfigLayer::new(
            LayerProvenance::Product,
            Cow::Owned(value),
            path,
        ));
    }

    /// Push a document read from `path` as a product override layer.
    pub fn push_file(&mut self, value: Value, path: Utf8PathBuf) {
        self.push_product(value, Some(path));
    }

    /// Push a CLI layer.
    pub fn push_cli(&mut self, value: Value) {
        self.push_layer(ConfigLayer::cli(Cow::Owned(value)));
    }

    /// Push an arbitrary layer.
    pub fn push_layer(&mut self, layer: ConfigLayer<'static>) {
        self.layers.push(layer);
    }

    /// Select the profile to apply, overriding any `profile=` assignment.
    pub fn select_profile(&mut self, name: impl Into<String>) {
        self.profile = Some(name.into());
    }

    /// Builder-style form of [`Self::select_profile`].
    #[must_use]
    pub fn with_profile(mut self, name: impl Into<String>) -> Self {
        self.select_profile(name);
        self
    }

    /// Profile to apply when none is requested explicitly.
    pub fn set_fallback_profile(&mut self, name: impl Into<String>) {
        self.fallback_profile = Some(name.into());
    }

    /// Borrow the accumulated layers.
    #[must_use]
    pub fn layers(&self) -> &[ConfigLayer<'static>] {
        &self.layers
    }

    /// Profile named by the builder or, failing that, by the last CLI
    /// layer assigning a string to `profile`.
    #[must_use]
    pub fn requested_profile(&self) -> Option<String> {
        self.profile.clone().or_else(|| {
            self.cli_layers()
                .filter_map(|layer| layer.value().as_object())
                .flat_map(|map| map.iter())
                .filter(|(raw, _)| MergeKey::parse(raw).property() == PROFILE_KEY)
                .filter_map(|(_, value)| value.as_str())
                .last()
                .map(str::to_owned)
        })
    }

    fn cli_layers(&self) -> impl Iterator<Item = &ConfigLayer<'static>> {
        self.layers
            .iter()
            .filter(|layer| layer.provenance() == LayerProvenance::Cli)
    }

    /// Blend every layer into an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BlendError::UnknownProfile`] when an explicitly
    /// requested profile is not defined by the blended layers.
    pub fn compose(&self) -> BlendResult<ComposedConfig> {
        let mut settings = Map::new();
        let mut applied = Vec::with_capacity(self.layers.len() + 1);
        let (cli, rest): (Vec<_>, Vec<_>) = self
            .layers
            .iter()
            .partition(|layer| layer.provenance() == LayerProvenance::Cli);

        for layer in rest {
            apply_layer(&mut settings, layer);
            applied.push(layer.provenance());
        }

        let profile = match self.requested_profile() {
            Some(name) => {
                select_profile(&mut settings, &name)?;
                Some(name)
            }
            None => self.apply_fallback(&mut settings),
        };
        if let Some(name) = profile.as_deref() {
            settings.insert(PROFILE_KEY.to_owned(), Value::String(name.to_owned()));
            applied.push(LayerProvenance::Profile);
        }

        for layer in cli {
            apply_layer(&mut settings, layer);
            applied.push(layer.provenance());
        }

        Ok(ComposedConfig {
            settings,
            profile,
            applied,
        })
    }

    fn apply_fallback(&self, settings: &mut Map<String, Value>) -> Option<String> {
        let name = self.fallback_profile.as_deref()?;
        select_profile(settings, name).map_or_else(
            |err| {
                debug!(profile = name, %err, "skipping undefined fallback profile");
                None
            },
            |()| Some(name.to_owned()),
        )
    }
}

impl IntoIterator for LayerComposer {
    type Item = ConfigLayer<'static>;
    type IntoIter = std::vec::IntoIter<ConfigLayer<'static>>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.into_iter()
    }
}

fn apply_layer(settings: &mut Map<String, Value>, layer: &ConfigLayer<'_>) {
    let Some(overlay) = Overlay::parse(layer.value()) else {
        debug!(provenance = ?layer.provenance(), "skipping non-mapping layer");
        return;
    };
    debug!(
        provenance = ?layer.provenance(),
        path = layer.path().map(Utf8Path::as_str),
        entries = overlay.entries().len(),
        "applying layer"
    );
    blend_into_map(settings, &overlay, Operator::Default);
}

/// Final configuration produced by [`LayerComposer::compose`].
#[derive(Clone, Debug, PartialEq)]
pub struct ComposedConfig {
    settings: Map<String, Value>,
    profile: Option<String>,
    applied: Vec<LayerProvenance>,
}

impl ComposedConfig {
    /// Borrow the composed mapping.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.settings
    }

    /// Look up a setting by dotted path; numeric segments index sequences.
    ///
    /// ```rust
    /// use blend_config::compose::LayerComposer;
    /// use serde_json::json;
    ///
    /// let mut composer = LayerComposer::new();
    /// composer.push_defaults(json!({"db": {"hosts": ["a", "b"]}}));
    /// let config = composer.compose()?;
    /// assert_eq!(config.get("db.hosts.1"), Some(&json!("b")));
    /// assert_eq!(config.get("db.port"), None);
    /// # Ok::<_, std::sync::Arc<blend_config::BlendError>>(())
    /// ```
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = self.settings.get(segments.next()?)?;
        segments.try_fold(first, |value, segment| match value {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            _ => None,
        })
    }

    /// Name of the profile that was applied, if any.
    #[must_use]
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Provenance of every applied layer, in application order.
    #[must_use]
    pub fn applied(&self) -> &[LayerProvenance] {
        &self.applied
    }

    /// Expand placeholders in `value` against the composed settings.
    #[must_use]
    pub fn expand(&self, value: &Value) -> Value {
        expand(value, &[&self.settings])
    }

    /// Expand each argument against the composed settings, then `extra`.
    #[must_use]
    pub fn expand_args<I, S>(&self, args: I, extra: &[&Context]) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let contexts: Vec<&Context> = std::iter::once(&self.settings)
            .chain(extra.iter().copied())
            .collect();
        args.into_iter()
            .map(|arg| expand_str(arg.as_ref(), &contexts))
            .collect()
    }

    /// Child-process environment: the process environment overlaid with the
    /// flattened settings expanded against `context`.
    #[must_use]
    pub fn env(&self, context: &Context) -> BTreeMap<String, String> {
        build_env(&self.settings, context)
    }

    /// Copy the settings into a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.settings.clone())
    }

    /// Consume the configuration, returning it as a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.settings)
    }

    /// Consume the configuration, returning the settings mapping.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.settings
    }
}
