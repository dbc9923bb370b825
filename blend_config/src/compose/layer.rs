//! Layer metadata and transport values for composition.

use std::borrow::Cow;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;

/// Origin of a configuration layer, in application order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum LayerProvenance {
    /// Built-in defaults supplied by the application.
    Defaults,
    /// Package metadata (for example a `package.json` manifest).
    Package,
    /// Product override documents.
    Product,
    /// Overrides taken from the selected profile.
    Profile,
    /// Assignments supplied on the command line.
    Cli,
}

/// A source document together with where it came from.
#[derive(Clone, Debug)]
pub struct ConfigLayer<'a> {
    provenance: LayerProvenance,
    value: Cow<'a, Value>,
    path: Option<Utf8PathBuf>,
}

impl<'a> ConfigLayer<'a> {
    /// Construct a layer from its parts.
    #[must_use]
    pub const fn new(
        provenance: LayerProvenance,
        value: Cow<'a, Value>,
        path: Option<Utf8PathBuf>,
    ) -> Self {
        Self {
            provenance,
            value,
            path,
        }
    }

    /// Construct a defaults layer.
    #[must_use]
    pub const fn defaults(value: Cow<'a, Value>) -> Self {
        Self::new(LayerProvenance::Defaults, value, None)
    }

    /// Construct a CLI layer.
    #[must_use]
    pub const fn cli(value: Cow<'a, Value>) -> Self {
        Self::new(LayerProvenance::Cli, value, None)
    }

    /// Returns the provenance of the layer.
    #[must_use]
    pub const fn provenance(&self) -> LayerProvenance {
        self.provenance
    }

    /// Returns the document path if this layer was read from disk.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// Borrow the source value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns an owned JSON value representing the layer.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value.into_owned()
    }

    /// Convert this layer into a `'static` owned variant.
    #[must_use]
    pub fn into_owned(self) -> ConfigLayer<'static> {
        ConfigLayer {
            provenance: self.provenance,
            value: Cow::Owned(self.value.into_owned()),
            path: self.path,
        }
    }
}
