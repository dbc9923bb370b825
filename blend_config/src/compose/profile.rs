//! Profile selection over a composed mapping.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::blend::{Operator, Overlay, blend_into_map};
use crate::env::RESERVED_KEY;
use crate::{BlendError, BlendResult};

/// Blend `settings.profiles.<name>` over `settings`.
///
/// The `profiles` table itself stays in place; flattening ignores it.
///
/// # Examples
///
/// ```
/// use blend_config::compose::select_profile;
/// use serde_json::json;
///
/// let mut settings = json!({
///     "port": 80,
///     "profiles": {"dev": {"port": 8080, "+tags": ["debug"]}}
/// })
/// .as_object()
/// .cloned()
/// .unwrap_or_default();
/// select_profile(&mut settings, "dev")?;
/// assert_eq!(settings.get("port"), Some(&json!(8080)));
/// assert_eq!(settings.get("tags"), Some(&json!(["debug"])));
/// # Ok::<_, std::sync::Arc<blend_config::BlendError>>(())
/// ```
///
/// # Errors
///
/// Returns [`BlendError::UnknownProfile`] when no profile named `name`
/// exists.
pub fn select_profile(settings: &mut Map<String, Value>, name: &str) -> BlendResult<()> {
    let profiles = settings.get(RESERVED_KEY).and_then(Value::as_object);
    let Some(overlay) = profiles
        .and_then(|table| table.get(name))
        .and_then(Overlay::parse)
    else {
        let available = profiles
            .map(|table| table.keys().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        return Err(Arc::new(BlendError::UnknownProfile {
            name: name.to_owned(),
            available,
        }));
    };
    debug!(profile = name, entries = overlay.entries().len(), "applying profile");
    blend_into_map(settings, &overlay, Operator::Default);
    Ok(())
}
