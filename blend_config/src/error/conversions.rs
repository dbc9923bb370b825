//! Conversions from external error types into `BlendError`.

use figment::Error as FigmentError;

use super::BlendError;

/// Figment extraction failures surface as [`BlendError::Gathering`].
impl From<FigmentError> for BlendError {
    fn from(e: FigmentError) -> Self {
        Self::gathering(e)
    }
}
