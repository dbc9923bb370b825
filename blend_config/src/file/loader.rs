//! Runtime loading entrypoint for configuration documents.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::{BlendResult, FileResultExt};

use super::error::invalid_data;
use super::parser::parse_document;

/// Load a configuration document, selecting the parser from its extension.
///
/// Returns `Ok(None)` when `path` is not a regular file, so optional
/// candidates can be listed unconditionally.
///
/// # Examples
///
/// ```rust,no_run
/// use blend_config::load_document;
/// use std::path::Path;
///
/// # fn run() -> blend_config::BlendResult<()> {
/// if let Some(doc) = load_document(Path::new("config/product.json"))? {
///     println!("loaded {} top-level keys", doc.len());
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns a [`crate::BlendError::File`] if reading or parsing fails, or if
/// the document root is not a mapping.
pub fn load_document(path: &Path) -> BlendResult<Option<Map<String, Value>>> {
    if !path.is_file() {
        debug!(path = %path.display(), "configuration candidate absent");
        return Ok(None);
    }
    let data = std::fs::read_to_string(path).for_file(path)?;
    match parse_document(path, &data)? {
        Value::Object(map) => {
            debug!(path = %path.display(), keys = map.len(), "loaded configuration document");
            Ok(Some(map))
        }
        other => Err(invalid_data(
            path,
            format!("expected a mapping at the document root, found {}", kind(&other)),
        )),
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
