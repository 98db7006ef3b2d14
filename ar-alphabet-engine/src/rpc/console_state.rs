use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::engine::scene::MarkerSummary;
use crate::engine::session::{LifecycleController, SessionSnapshot};

/// Last published view of the session for synchronous readers.
#[derive(Debug, Clone, Default)]
pub struct PublishedSession {
    pub snapshot: Option<SessionSnapshot>,
    pub markers: Vec<MarkerSummary>,
    pub config: serde_json::Value,
}

/// Session view shared with the browser console.
///
/// The exported console functions cannot wait for a frame, so the engine
/// republishes here whenever the session changes and they read the copy.
#[derive(Resource, Clone, Default)]
pub struct ConsoleState(Arc<Mutex<PublishedSession>>);

impl ConsoleState {
    pub fn latest(&self) -> PublishedSession {
        match self.0.lock() {
            Ok(published) => published.clone(),
            Err(_) => PublishedSession::default(),
        }
    }

    /// Stores the controller's view. Returns whether anything changed.
    pub fn publish(&self, controller: &LifecycleController) -> bool {
        let Ok(mut published) = self.0.lock() else {
            return false;
        };

        let snapshot = controller.snapshot();
        let markers = controller.registered_markers();
        if published.snapshot.as_ref() == Some(&snapshot) && published.markers == markers {
            return false;
        }

        if published.snapshot.is_none() {
            published.config = serde_json::to_value(controller.config()).unwrap_or_default();
        }
        published.snapshot = Some(snapshot);
        published.markers = markers.to_vec();
        true
    }
}

pub fn publish_console_state(
    controller: Option<Res<LifecycleController>>,
    console: Res<ConsoleState>,
) {
    let Some(controller) = controller else {
        return;
    };
    if console.publish(&controller) {
        debug!("Console state republished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::{ArConfig, Letter};
    use crate::engine::scene::RecordingScene;
    use crate::engine::session::{ArHost, CameraResult, HostEvent, MarkerEvent, SceneEvent};
    use crate::ui::RecordingUi;

    #[test]
    fn publishes_only_on_change() {
        let mut controller = LifecycleController::new(&ArConfig::default());
        let console = ConsoleState::default();
        assert!(console.latest().snapshot.is_none());

        assert!(console.publish(&controller));
        assert!(!console.publish(&controller));
        assert_eq!(console.latest().config["animations"]["rotation_duration_ms"], 3000);

        let mut ui = RecordingUi::new();
        let mut scene = RecordingScene::new();
        let mut host = ArHost {
            ui: &mut ui,
            scene: &mut scene,
        };
        controller.handle(HostEvent::Camera(CameraResult::Granted), &mut host);
        controller.handle(HostEvent::Scene(SceneEvent::Loaded), &mut host);
        let y = Letter::from_char('Y').expect("letter");
        controller.handle(HostEvent::Marker(MarkerEvent::Found(y)), &mut host);

        assert!(console.publish(&controller));
        let latest = console.latest();
        assert_eq!(latest.markers.len(), 26);
        assert_eq!(latest.snapshot.and_then(|s| s.current_letter), Some(y));
    }
}
