/// Progress shown once camera access is granted.
pub const PROGRESS_CAMERA_GRANTED: u8 = 30;

/// Progress shown once the scene framework reports `loaded`.
pub const PROGRESS_SCENE_LOADED: u8 = 60;

/// Share of the bar covered by model loading, on top of `PROGRESS_SCENE_LOADED`.
pub const PROGRESS_ASSET_SPAN: u8 = 40;

/// Asset loading never reports completion on its own.
pub const PROGRESS_ASSET_CAP: u8 = 99;

/// Progress set by the first rendered frame, before the settle delay.
pub const PROGRESS_RENDER_STARTED: u8 = 95;

pub const PROGRESS_COMPLETE: u8 = 100;

/// Delay between `renderstart` and hiding the loading overlay (ms).
pub const SETTLE_DELAY_MS: u64 = 500;

/// Lifetime of the gesture hint overlay (ms).
pub const GESTURE_HINT_MS: u64 = 3000;

/// Default duration of one full model turn (ms).
pub const ROTATION_DURATION_MS: u64 = 3000;
