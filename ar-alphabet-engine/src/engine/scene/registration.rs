use bevy::prelude::*;

use super::descriptor::MarkerDescriptor;
use super::graph::SceneGraph;
use crate::engine::assets::{ArConfig, AssetRegistry, Letter};
use crate::error::ArError;

/// Outcome of one `register_all_markers` pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistrationReport {
    pub registered: Vec<Letter>,
    pub skipped: Vec<Letter>,
}

/// Registers a marker and model for every letter that does not have one yet.
///
/// Runs in A to Z order. Letters already present in the scene are skipped,
/// so calling this twice never duplicates a marker.
pub fn register_all_markers(
    registry: &AssetRegistry,
    config: &ArConfig,
    scene: &mut dyn SceneGraph,
) -> Result<RegistrationReport, ArError> {
    if !scene.has_scene_root() {
        return Err(ArError::SceneInitialization(
            "scene root element not found".to_string(),
        ));
    }

    let mut report = RegistrationReport::default();
    for asset in registry.iter() {
        if scene.has_marker(asset.letter) {
            debug!("Marker {} already registered, skipping", asset.letter);
            report.skipped.push(asset.letter);
            continue;
        }

        let descriptor = MarkerDescriptor::new(asset, config);
        scene.append_marker(&descriptor)?;
        report.registered.push(asset.letter);
    }

    info!(
        "Registered {} markers ({} already present)",
        report.registered.len(),
        report.skipped.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::graph::RecordingScene;

    #[test]
    fn registers_every_letter_once_in_order() {
        let config = ArConfig::default();
        let registry = AssetRegistry::from_config(&config);
        let mut scene = RecordingScene::new();

        let report = register_all_markers(&registry, &config, &mut scene).expect("register");
        assert_eq!(report.registered.len(), 26);
        assert!(report.skipped.is_empty());

        let log = scene.log();
        assert_eq!(log.registered_letters(), Letter::all().collect::<Vec<_>>());
        for (descriptor, letter) in log.markers.iter().zip(Letter::all()) {
            assert_eq!(
                descriptor.pattern_url,
                format!("assets/markers/pattern-{letter}.patt")
            );
            assert_eq!(descriptor.model_url, config.model_path(letter));
        }
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let config = ArConfig::default();
        let registry = AssetRegistry::from_config(&config);
        let mut scene = RecordingScene::new();

        register_all_markers(&registry, &config, &mut scene).expect("first pass");
        let report = register_all_markers(&registry, &config, &mut scene).expect("second pass");

        assert!(report.registered.is_empty());
        assert_eq!(report.skipped.len(), 26);
        assert_eq!(scene.log().markers.len(), 26);
    }

    #[test]
    fn missing_scene_root_is_an_initialization_error() {
        let config = ArConfig::default();
        let registry = AssetRegistry::from_config(&config);
        let mut scene = RecordingScene::without_root();

        let result = register_all_markers(&registry, &config, &mut scene);
        assert!(matches!(result, Err(ArError::SceneInitialization(_))));
        assert!(scene.log().markers.is_empty());
    }
}
