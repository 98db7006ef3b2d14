use bevy::prelude::*;
use constants::{dom, model};
use serde::Serialize;

use crate::engine::assets::{ArConfig, Letter, LetterAsset};

/// Static transform of a letter model relative to its marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityTransform {
    pub scale: Vec3,
    pub position: Vec3,
    /// Euler angles in degrees, as the scene framework expects.
    pub rotation: Vec3,
}

impl Default for EntityTransform {
    fn default() -> Self {
        Self {
            scale: model::DEFAULT_MODEL_SCALE,
            position: model::DEFAULT_MODEL_POSITION,
            rotation: model::DEFAULT_MODEL_ROTATION,
        }
    }
}

impl EntityTransform {
    pub fn from_config(config: &ArConfig) -> Self {
        Self {
            scale: Vec3::from_array(config.models.scale),
            position: Vec3::from_array(config.models.position),
            rotation: Vec3::from_array(config.models.rotation),
        }
    }
}

/// Formats a vector as a space separated attribute triple, e.g. `0.5 0.5 0.5`.
pub fn attribute_triple(v: Vec3) -> String {
    format!("{} {} {}", v.x, v.y, v.z)
}

/// Continuous spin about the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationAnimation {
    pub to: Vec3,
    pub duration_ms: u64,
    pub looping: bool,
}

impl RotationAnimation {
    pub fn spin(duration_ms: u64) -> Self {
        Self {
            to: model::SPIN_TARGET_DEGREES,
            duration_ms,
            looping: true,
        }
    }

    /// Value for the framework's `animation` attribute.
    pub fn attribute(&self) -> String {
        format!(
            "property: rotation; to: {}; dur: {}; loop: {}",
            attribute_triple(self.to),
            self.duration_ms,
            self.looping
        )
    }
}

/// Everything the scene needs to create one marker and its model.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDescriptor {
    pub letter: Letter,
    pub marker_id: String,
    pub entity_id: String,
    pub pattern_url: String,
    pub model_url: String,
    pub transform: EntityTransform,
    pub animation: RotationAnimation,
}

impl MarkerDescriptor {
    pub fn new(asset: &LetterAsset, config: &ArConfig) -> Self {
        Self {
            letter: asset.letter,
            marker_id: marker_element_id(asset.letter),
            entity_id: model_element_id(asset.letter),
            pattern_url: asset.marker_path.clone(),
            model_url: asset.model_path.clone(),
            transform: EntityTransform::from_config(config),
            animation: RotationAnimation::spin(config.animations.rotation_duration_ms),
        }
    }

    /// Value for the entity's `gltf-model` attribute.
    pub fn model_attribute(&self) -> String {
        format!("url({})", self.model_url)
    }

    pub fn summary(&self) -> MarkerSummary {
        MarkerSummary {
            letter: self.letter,
            marker_id: self.marker_id.clone(),
            pattern_url: self.pattern_url.clone(),
            model_url: self.model_url.clone(),
        }
    }
}

/// Serializable view of a registered marker for the control surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerSummary {
    pub letter: Letter,
    pub marker_id: String,
    pub pattern_url: String,
    pub model_url: String,
}

pub fn marker_element_id(letter: Letter) -> String {
    format!("{}{}", dom::MARKER_ID_PREFIX, letter)
}

pub fn model_element_id(letter: Letter) -> String {
    format!("{}{}", dom::MODEL_ID_PREFIX, letter)
}
