use bevy::math::Vec3;

/// Uniform scale applied to every letter model.
pub const DEFAULT_MODEL_SCALE: Vec3 = Vec3::splat(0.5);
pub const DEFAULT_MODEL_POSITION: Vec3 = Vec3::ZERO;
pub const DEFAULT_MODEL_ROTATION: Vec3 = Vec3::ZERO;

/// Rotation target of the idle spin, in degrees about each axis.
pub const SPIN_TARGET_DEGREES: Vec3 = Vec3::new(0.0, 360.0, 0.0);

/// Camera constraints requested from the media-devices API.
pub const CAMERA_FACING_MODE: &str = "environment";
pub const CAMERA_IDEAL_WIDTH: u32 = 1280;
pub const CAMERA_IDEAL_HEIGHT: u32 = 720;
