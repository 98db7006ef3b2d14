use std::time::Duration;

use ar_alphabet_engine::ArAlphabetPlugin;
use ar_alphabet_engine::engine::assets::{ArConfig, AssetRegistry, Letter};
use ar_alphabet_engine::engine::core::app_state::HostState;
use ar_alphabet_engine::engine::core::session_systems::{SceneBinding, UiBinding};
use ar_alphabet_engine::engine::loading::LoadingPhase;
use ar_alphabet_engine::engine::scene::RecordingScene;
use ar_alphabet_engine::engine::session::{
    AssetEvent, CameraResult, HostEvent, HostEventQueue, LifecycleController, MarkerEvent,
    SceneEvent,
};
use ar_alphabet_engine::rpc::web_rpc::RpcMessageQueue;
use ar_alphabet_engine::ui::RecordingUi;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

struct Harness {
    app: App,
    ui: RecordingUi,
    scene: RecordingScene,
}

impl Harness {
    fn new(config: Option<ArConfig>, scene: RecordingScene) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(StatesPlugin)
            .add_plugins(ArAlphabetPlugin)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        if let Some(config) = config {
            app.insert_resource(config);
        }

        let ui = RecordingUi::new();
        app.insert_non_send_resource(UiBinding(Box::new(ui.clone())))
            .insert_non_send_resource(SceneBinding(Box::new(scene.clone())));

        let mut harness = Self { app, ui, scene };
        harness.run(3);
        harness
    }

    fn run(&mut self, frames: usize) {
        for _ in 0..frames {
            self.app.update();
        }
    }

    fn send(&mut self, event: HostEvent) {
        self.app.world().resource::<HostEventQueue>().push(event);
        self.app.update();
    }

    fn rpc(&mut self, message: &str) {
        self.app
            .world()
            .resource::<RpcMessageQueue>()
            .push(message.to_string());
        self.app.update();
    }

    fn controller(&self) -> &LifecycleController {
        self.app.world().resource::<LifecycleController>()
    }

    fn load_to_ready(&mut self) {
        self.send(HostEvent::Camera(CameraResult::Granted));
        self.send(HostEvent::Scene(SceneEvent::Loaded));
        self.send(HostEvent::Scene(SceneEvent::RenderStart));
    }
}

#[test]
fn host_reaches_running_with_supplied_config() {
    let harness = Harness::new(Some(ArConfig::default()), RecordingScene::new());

    let state = harness.app.world().resource::<State<HostState>>();
    assert_eq!(*state.get(), HostState::Running);
    assert_eq!(harness.app.world().resource::<AssetRegistry>().len(), 26);
    assert_eq!(*harness.controller().phase(), LoadingPhase::AwaitingCamera);
    assert_eq!(harness.ui.log().detected_letter, "Detected Letter: None");
}

#[test]
fn missing_asset_server_falls_back_to_default_config() {
    let harness = Harness::new(None, RecordingScene::new());

    let config = harness.app.world().resource::<ArConfig>();
    assert_eq!(config.animations.rotation_duration_ms, 3000);
    assert!(!config.audio.enabled);
}

#[test]
fn invalid_supplied_config_is_replaced_by_defaults() {
    let mut config = ArConfig::default();
    config.animations.rotation_duration_ms = 0;
    let harness = Harness::new(Some(config), RecordingScene::new());

    let config = harness.app.world().resource::<ArConfig>();
    assert_eq!(config.animations.rotation_duration_ms, 3000);
}

#[test]
fn full_loading_sequence_hides_overlay_after_settle_delay() {
    let mut harness = Harness::new(Some(ArConfig::default()), RecordingScene::new());

    harness.send(HostEvent::Camera(CameraResult::Granted));
    assert_eq!(harness.ui.log().progress, 30);

    harness.send(HostEvent::Scene(SceneEvent::Loaded));
    assert_eq!(harness.scene.log().markers.len(), 26);
    assert_eq!(*harness.controller().phase(), LoadingPhase::MarkersRegistered);

    harness.send(HostEvent::Asset(AssetEvent::ModelLoaded(Letter::from_char('A').unwrap())));
    assert_eq!(*harness.controller().phase(), LoadingPhase::AssetsLoading);

    harness.send(HostEvent::Scene(SceneEvent::RenderStart));
    assert_eq!(*harness.controller().phase(), LoadingPhase::Ready);
    assert!(harness.ui.log().loading_overlay_visible);

    harness.run(10);
    let log = harness.ui.log();
    assert_eq!(log.progress, 100);
    assert!(!log.loading_overlay_visible);
    assert!(log.progress_history.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn scene_loaded_before_camera_is_deferred() {
    let mut harness = Harness::new(Some(ArConfig::default()), RecordingScene::new());

    harness.send(HostEvent::Scene(SceneEvent::Loaded));
    assert!(harness.scene.log().markers.is_empty());

    harness.send(HostEvent::Camera(CameraResult::Granted));
    assert_eq!(harness.scene.log().markers.len(), 26);
    assert_eq!(*harness.controller().phase(), LoadingPhase::MarkersRegistered);
}

#[test]
fn camera_denial_shows_error_and_blocks_registration() {
    let mut harness = Harness::new(Some(ArConfig::default()), RecordingScene::new());

    harness.send(HostEvent::Camera(CameraResult::Denied {
        name: "NotAllowedError".to_string(),
        message: "Permission denied".to_string(),
    }));
    harness.send(HostEvent::Scene(SceneEvent::Loaded));

    assert!(harness.controller().phase().is_failed());
    assert!(harness.scene.log().markers.is_empty());
    let error = harness.ui.log().error.clone().expect("error shown");
    assert!(error.contains("NotAllowedError"));
}

#[test]
fn missing_scene_root_fails_on_start() {
    let harness = Harness::new(Some(ArConfig::default()), RecordingScene::without_root());

    assert!(harness.controller().phase().is_failed());
    assert!(harness.ui.log().error.is_some());
}

#[test]
fn marker_found_and_lost_update_letter_and_animation() {
    let mut harness = Harness::new(Some(ArConfig::default()), RecordingScene::new());
    harness.load_to_ready();
    let b = Letter::from_char('B').unwrap();

    harness.send(HostEvent::Marker(MarkerEvent::Found(b)));
    assert_eq!(harness.controller().current_letter(), Some(b));
    assert_eq!(harness.ui.log().detected_letter, "Detected: B - Ball");
    assert!(harness.scene.log().animating.contains(&b));
    assert!(harness.ui.log().gesture_hint.is_some());

    harness.send(HostEvent::Marker(MarkerEvent::Lost(b)));
    assert_eq!(harness.controller().current_letter(), None);
    assert!(!harness.scene.log().animating.contains(&b));
    assert!(harness.ui.log().gesture_hint.is_none());
}

#[test]
fn gesture_hint_expires_after_its_timer() {
    let mut harness = Harness::new(Some(ArConfig::default()), RecordingScene::new());
    harness.load_to_ready();

    harness.send(HostEvent::Marker(MarkerEvent::Found(Letter::from_char('C').unwrap())));
    assert!(harness.ui.log().gesture_hint.is_some());

    harness.run(35);
    assert!(harness.ui.log().gesture_hint.is_none());
    assert!(harness.controller().current_letter().is_some());
}

#[test]
fn audio_plays_only_when_enabled() {
    let mut config = ArConfig::default();
    config.audio.enabled = true;
    let mut harness = Harness::new(Some(config), RecordingScene::new());
    harness.load_to_ready();

    harness.send(HostEvent::Marker(MarkerEvent::Found(Letter::from_char('D').unwrap())));
    assert_eq!(harness.scene.log().audio, vec!["assets/audio/D.mp3".to_string()]);

    harness.send(HostEvent::Key("a".to_string()));
    assert!(!harness.controller().session().audio_enabled);

    harness.send(HostEvent::Marker(MarkerEvent::Found(Letter::from_char('E').unwrap())));
    assert_eq!(harness.scene.log().audio.len(), 1);
}

#[test]
fn rpc_requests_reach_the_controller() {
    let mut harness = Harness::new(Some(ArConfig::default()), RecordingScene::new());

    harness.rpc(r#"{"jsonrpc":"2.0","method":"toggle_gestures","id":1}"#);
    assert!(!harness.controller().session().gestures_enabled);

    harness.rpc(r#"{"jsonrpc":"2.0","method":"set_audio","params":{"enabled":true},"id":2}"#);
    assert!(harness.controller().session().audio_enabled);

    // Malformed input is answered with an error and changes nothing.
    harness.rpc("{ not json");
    assert!(harness.controller().session().audio_enabled);
}
