use bevy::prelude::*;
use serde::Serialize;

use super::{ArConfig, Letter};

/// Paths and display data for one flashcard letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterAsset {
    pub letter: Letter,
    pub marker_path: String,
    pub model_path: String,
    pub mnemonic: Option<String>,
    pub audio_path: Option<String>,
}

impl LetterAsset {
    /// `A - Apple`, or just `A` when no mnemonic is known.
    pub fn display_name(&self) -> String {
        match &self.mnemonic {
            Some(name) => format!("{} - {}", self.letter, name),
            None => self.letter.to_string(),
        }
    }
}

/// Static letter-to-asset table, built once from configuration.
#[derive(Resource, Debug, Clone)]
pub struct AssetRegistry {
    assets: Vec<LetterAsset>,
}

impl AssetRegistry {
    pub fn from_config(config: &ArConfig) -> Self {
        let assets = Letter::all()
            .map(|letter| LetterAsset {
                letter,
                marker_path: config.marker_path(letter),
                model_path: config.model_path(letter),
                mnemonic: letter.mnemonic().map(str::to_string),
                audio_path: config.audio_path(letter),
            })
            .collect();
        Self { assets }
    }

    pub fn get(&self, letter: Letter) -> Option<&LetterAsset> {
        self.assets.get(letter.index())
    }

    /// Assets in A to Z order.
    pub fn iter(&self) -> impl Iterator<Item = &LetterAsset> {
        self.assets.iter()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::from_config(&ArConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_alphabet_in_order() {
        let registry = AssetRegistry::default();
        assert_eq!(registry.len(), 26);

        let order: Vec<char> = registry.iter().map(|a| a.letter.as_char()).collect();
        let expected: Vec<char> = ('A'..='Z').collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn lookup_returns_matching_asset() {
        let registry = AssetRegistry::default();
        let g = Letter::from_char('g').expect("letter");
        let asset = registry.get(g).expect("asset");

        assert_eq!(asset.letter, g);
        assert_eq!(asset.marker_path, "assets/markers/pattern-G.patt");
        assert_eq!(asset.model_path, "assets/3dmodels/G.gltf");
        assert_eq!(asset.display_name(), "G - Grapes");
    }
}
