//! Element ids and classes the page markup must provide.

pub const INSTRUCTIONS_ID: &str = "instructions";
pub const CURRENT_LETTER_ID: &str = "current-letter";
pub const LOADING_STATUS_ID: &str = "loading-status";
pub const LOADING_PROGRESS_ID: &str = "loading-progress";
pub const LOADING_OVERLAY_ID: &str = "loading-overlay";
pub const ERROR_OVERLAY_ID: &str = "error-overlay";
pub const ERROR_MESSAGE_ID: &str = "error-message";

pub const GESTURE_HINT_CLASS: &str = "gesture-hint";

/// Class toggled on overlays to hide them.
pub const HIDDEN_CLASS: &str = "hidden";

pub const SCENE_SELECTOR: &str = "a-scene";
pub const MARKER_ID_PREFIX: &str = "marker-";
pub const MODEL_ID_PREFIX: &str = "model-";
