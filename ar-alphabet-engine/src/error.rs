use thiserror::Error;

use crate::engine::assets::Letter;

/// Failures surfaced by the flashcard engine.
///
/// Everything except `AssetLoad` is fatal to the session and ends up on the
/// error overlay; asset failures are only logged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArError {
    #[error("Camera access denied ({name}): {message}")]
    CameraPermissionDenied { name: String, message: String },

    #[error("AR scene could not be initialised: {0}")]
    SceneInitialization(String),

    #[error("AR scene error: {0}")]
    SceneRuntime(String),

    #[error("model for letter {letter} failed to load: {message}")]
    AssetLoad { letter: Letter, message: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl ArError {
    /// Fatal errors move the lifecycle into `Failed`.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::AssetLoad { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_asset_failures_are_recoverable() {
        let letter = Letter::from_char('Q').expect("letter");
        let asset = ArError::AssetLoad {
            letter,
            message: "404".to_string(),
        };
        assert!(!asset.is_fatal());
        assert_eq!(asset.to_string(), "model for letter Q failed to load: 404");

        let denied = ArError::CameraPermissionDenied {
            name: "NotAllowedError".to_string(),
            message: "Permission denied".to_string(),
        };
        assert!(denied.is_fatal());
        assert_eq!(
            denied.to_string(),
            "Camera access denied (NotAllowedError): Permission denied"
        );
    }
}
