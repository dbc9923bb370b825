//! Format-specific parsing utilities for configuration documents.

use std::path::Path;

use serde_json::Value;

use crate::{BlendResult, BlendResultExt, FileResultExt};

/// Parse document text according to the file extension.
///
/// `.json` files are parsed with `serde_json`, keeping key order; every
/// other extension is treated as TOML.
///
/// # Errors
///
/// Returns a [`crate::BlendError::File`] if the contents fail to parse or if
/// the `toml` feature is disabled for a TOML document, and
/// [`crate::BlendError::Gathering`] if figment cannot extract a parsed TOML
/// document.
pub(super) fn parse_document(path: &Path, data: &str) -> BlendResult<Value> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => serde_json::from_str(data).for_file(path),
        _ => parse_toml(path, data),
    }
}

#[cfg(feature = "toml")]
fn parse_toml(path: &Path, data: &str) -> BlendResult<Value> {
    use figment::{
        Figment,
        providers::{Format, Toml},
    };

    // Validate first so syntax errors carry this file's path before Figment
    // performs its own parse pass.
    toml::from_str::<toml::Value>(data).for_file(path)?;
    Figment::from(Toml::string(data)).extract::<Value>().into_blend()
}

#[cfg(not(feature = "toml"))]
fn parse_toml(path: &Path, _data: &str) -> BlendResult<Value> {
    Err(super::error::unsupported(
        path,
        "toml feature disabled: enable the 'toml' feature to load this document",
    ))
}
