use serde::Serialize;

use crate::engine::assets::Letter;
use crate::engine::loading::{LoadingPhase, LoadingProgress};

/// Per-page session state. One instance per controller, never persisted.
#[derive(Debug, Clone)]
pub struct SessionState {
    current_letter: Option<Letter>,
    pub audio_enabled: bool,
    pub gestures_enabled: bool,
    pub progress: LoadingProgress,
}

impl SessionState {
    pub fn new(audio_enabled: bool, assets_total: usize) -> Self {
        Self {
            current_letter: None,
            audio_enabled,
            gestures_enabled: true,
            progress: LoadingProgress::new(assets_total),
        }
    }

    pub fn current_letter(&self) -> Option<Letter> {
        self.current_letter
    }

    /// Derived from `current_letter`, so a detected marker always has a letter.
    pub fn marker_detected(&self) -> bool {
        self.current_letter.is_some()
    }

    pub fn loading_progress(&self) -> u8 {
        self.progress.value()
    }

    pub fn set_current_letter(&mut self, letter: Letter) {
        self.current_letter = Some(letter);
    }

    /// Clears the current letter only if it is `letter`.
    pub fn clear_current_letter(&mut self, letter: Letter) -> bool {
        if self.current_letter == Some(letter) {
            self.current_letter = None;
            true
        } else {
            false
        }
    }
}

/// Owned copy of the session handed to external callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub current_letter: Option<Letter>,
    pub marker_detected: bool,
    pub audio_enabled: bool,
    pub gestures_enabled: bool,
    pub loading_progress: u8,
    pub phase: LoadingPhase,
    pub detected_letters: Vec<Letter>,
    pub assets_loaded: usize,
    pub assets_failed: usize,
    pub assets_total: usize,
}
