use std::collections::BTreeSet;

use constants::loading::{
    PROGRESS_ASSET_CAP, PROGRESS_ASSET_SPAN, PROGRESS_CAMERA_GRANTED, PROGRESS_COMPLETE,
    PROGRESS_RENDER_STARTED, PROGRESS_SCENE_LOADED,
};

use crate::engine::assets::Letter;

/// Loading bar value plus the per-model bookkeeping behind it.
#[derive(Debug, Clone, Default)]
pub struct LoadingProgress {
    value: u8,
    assets_total: usize,
    loaded: BTreeSet<Letter>,
    failed: BTreeSet<Letter>,
}

impl LoadingProgress {
    pub fn new(assets_total: usize) -> Self {
        Self {
            assets_total,
            ..Default::default()
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn assets_total(&self) -> usize {
        self.assets_total
    }

    pub fn assets_loaded(&self) -> usize {
        self.loaded.len()
    }

    pub fn assets_failed(&self) -> usize {
        self.failed.len()
    }

    /// Models that finished either way.
    pub fn assets_settled(&self) -> usize {
        self.loaded.len() + self.failed.len()
    }

    pub fn camera_granted(&mut self) -> u8 {
        self.value = PROGRESS_CAMERA_GRANTED;
        self.value
    }

    pub fn scene_loaded(&mut self) -> u8 {
        self.value = PROGRESS_SCENE_LOADED;
        self.value
    }

    /// Records one model outcome. Returns false for a letter already settled.
    pub fn asset_settled(&mut self, letter: Letter, loaded: bool) -> bool {
        if self.loaded.contains(&letter) || self.failed.contains(&letter) {
            return false;
        }
        if loaded {
            self.loaded.insert(letter);
        } else {
            self.failed.insert(letter);
        }
        true
    }

    /// `60 + 40 * settled / total`, capped at 99.
    pub fn interpolate_assets(&mut self) -> u8 {
        if self.assets_total == 0 {
            return self.value;
        }
        let span = PROGRESS_ASSET_SPAN as usize * self.assets_settled() / self.assets_total;
        let value = (PROGRESS_SCENE_LOADED as usize + span).min(PROGRESS_ASSET_CAP as usize);
        self.value = value as u8;
        self.value
    }

    pub fn render_started(&mut self) -> u8 {
        self.value = PROGRESS_RENDER_STARTED;
        self.value
    }

    pub fn complete(&mut self) -> u8 {
        self.value = PROGRESS_COMPLETE;
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_progress_interpolates_and_caps() {
        let mut progress = LoadingProgress::new(26);
        progress.scene_loaded();

        let mut previous = progress.value();
        for letter in Letter::all() {
            assert!(progress.asset_settled(letter, true));
            let value = progress.interpolate_assets();
            assert!(value >= previous);
            previous = value;
        }
        assert_eq!(progress.value(), 99);
    }

    #[test]
    fn duplicate_outcomes_are_ignored() {
        let mut progress = LoadingProgress::new(4);
        let a = Letter::from_char('A').expect("letter");
        assert!(progress.asset_settled(a, true));
        assert!(!progress.asset_settled(a, false));
        assert_eq!(progress.interpolate_assets(), 70);
        assert_eq!(progress.assets_failed(), 0);
    }

    #[test]
    fn failures_count_towards_progress() {
        let mut progress = LoadingProgress::new(2);
        progress.asset_settled(Letter::from_char('A').expect("letter"), false);
        assert_eq!(progress.interpolate_assets(), 80);
        assert_eq!(progress.assets_settled(), 1);
    }
}
