use bevy::prelude::*;
use constants::{asset_paths, loading, model};
use serde::{Deserialize, Serialize};

use super::Letter;
use crate::error::ArError;

/// Engine configuration, loaded from `config/flashcards.json`.
///
/// Every field has a default so a partial file only overrides what it names.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArConfig {
    pub camera: CameraConfig,
    pub models: ModelConfig,
    pub markers: MarkerConfig,
    pub animations: AnimationConfig,
    pub audio: AudioConfig,
    pub paths: AssetPathsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// `environment` for the rear camera, `user` for the front one.
    pub facing_mode: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub scale: [f32; 3],
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub format: ModelFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    #[default]
    Gltf,
    Glb,
}

impl ModelFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Gltf => ".gltf",
            Self::Glb => ".glb",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub file_prefix: String,
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub rotation_duration_ms: u64,
    pub settle_delay_ms: u64,
    pub gesture_hint_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Initial value of the session's audio toggle.
    pub enabled: bool,
    pub extension: String,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPathsConfig {
    pub markers: String,
    pub models: String,
    /// Empty disables per-letter audio cues.
    pub audio: String,
}

impl Default for ArConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            models: ModelConfig::default(),
            markers: MarkerConfig::default(),
            animations: AnimationConfig::default(),
            audio: AudioConfig::default(),
            paths: AssetPathsConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            facing_mode: model::CAMERA_FACING_MODE.to_string(),
            width: model::CAMERA_IDEAL_WIDTH,
            height: model::CAMERA_IDEAL_HEIGHT,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            scale: model::DEFAULT_MODEL_SCALE.to_array(),
            position: model::DEFAULT_MODEL_POSITION.to_array(),
            rotation: model::DEFAULT_MODEL_ROTATION.to_array(),
            format: ModelFormat::default(),
        }
    }
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            file_prefix: asset_paths::MARKER_FILE_PREFIX.to_string(),
            extension: asset_paths::MARKER_EXTENSION.to_string(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            rotation_duration_ms: loading::ROTATION_DURATION_MS,
            settle_delay_ms: loading::SETTLE_DELAY_MS,
            gesture_hint_ms: loading::GESTURE_HINT_MS,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            extension: asset_paths::AUDIO_EXTENSION.to_string(),
            volume: 0.7,
        }
    }
}

impl Default for AssetPathsConfig {
    fn default() -> Self {
        Self {
            markers: asset_paths::MARKERS_PATH.to_string(),
            models: asset_paths::MODELS_PATH.to_string(),
            audio: asset_paths::AUDIO_PATH.to_string(),
        }
    }
}

impl ArConfig {
    /// `assets/markers/pattern-A.patt`
    pub fn marker_path(&self, letter: Letter) -> String {
        format!(
            "{}{}{}{}",
            self.paths.markers, self.markers.file_prefix, letter, self.markers.extension
        )
    }

    /// `assets/3dmodels/A.gltf` or `.glb`, depending on the configured format.
    pub fn model_path(&self, letter: Letter) -> String {
        format!(
            "{}{}{}",
            self.paths.models,
            letter,
            self.models.format.extension()
        )
    }

    pub fn audio_path(&self, letter: Letter) -> Option<String> {
        if self.paths.audio.is_empty() {
            return None;
        }
        Some(format!("{}{}{}", self.paths.audio, letter, self.audio.extension))
    }

    pub fn validate(&self) -> Result<(), ArError> {
        let animations = &self.animations;
        if animations.rotation_duration_ms == 0
            || animations.settle_delay_ms == 0
            || animations.gesture_hint_ms == 0
        {
            return Err(ArError::InvalidConfig(
                "animation durations must be positive".to_string(),
            ));
        }
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(ArError::InvalidConfig(
                "camera resolution must be positive".to_string(),
            ));
        }
        if !self.markers.extension.starts_with('.') {
            return Err(ArError::InvalidConfig(format!(
                "marker extension '{}' must start with '.'",
                self.markers.extension
            )));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(ArError::InvalidConfig(format!(
                "audio volume {} is outside 0.0..=1.0",
                self.audio.volume
            )));
        }
        Ok(())
    }
}
