use super::sink::UiSink;
use crate::engine::assets::LetterAsset;
use crate::engine::loading::LoadingPhase;
use crate::error::ArError;

pub const NO_LETTER_LABEL: &str = "Detected Letter: None";
pub const READY_STATUS: &str = "Point your camera at a letter marker";
pub const RESET_STATUS: &str = "Scene reset - Point camera at markers";

/// `Detected: A - Apple`, or the placeholder when nothing is tracked.
pub fn detected_label(asset: Option<&LetterAsset>) -> String {
    match asset {
        Some(asset) => format!("Detected: {}", asset.display_name()),
        None => NO_LETTER_LABEL.to_string(),
    }
}

pub fn phase_status(phase: &LoadingPhase, settled: usize, total: usize) -> String {
    match phase {
        LoadingPhase::AwaitingCamera => "Requesting camera access...".to_string(),
        LoadingPhase::CameraGranted => "Camera ready, loading AR scene...".to_string(),
        LoadingPhase::SceneLoaded => "Scene loaded, registering markers...".to_string(),
        LoadingPhase::MarkersRegistered | LoadingPhase::AssetsLoading => {
            format!("Loading 3D models ({settled}/{total})...")
        }
        LoadingPhase::Ready => "Ready!".to_string(),
        LoadingPhase::Failed(reason) => format!("Failed: {reason}"),
    }
}

/// CSS width for the progress bar.
pub fn progress_width(percent: u8) -> String {
    format!("{}%", percent.min(100))
}

pub fn gesture_hint_text(asset: &LetterAsset) -> String {
    format!("{}: move the card to turn the model", asset.display_name())
}

pub fn toggle_status(feature: &str, enabled: bool) -> String {
    format!("{}: {}", feature, if enabled { "ON" } else { "OFF" })
}

pub fn present_phase(ui: &mut dyn UiSink, phase: &LoadingPhase, settled: usize, total: usize) {
    ui.set_loading_status(&phase_status(phase, settled, total));
}

pub fn present_detected(ui: &mut dyn UiSink, asset: Option<&LetterAsset>) {
    ui.set_detected_letter(&detected_label(asset));
}

pub fn present_error(ui: &mut dyn UiSink, error: &ArError) {
    ui.show_error(&error.to_string());
}
