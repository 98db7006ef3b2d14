use std::collections::BTreeSet;
use std::time::Duration;

use bevy::prelude::*;

use super::events::{AssetEvent, CameraResult, HostEvent, MarkerEvent, SceneEvent};
use super::state::{SessionSnapshot, SessionState};
use crate::engine::assets::{ArConfig, AssetRegistry, Letter, LetterAsset};
use crate::engine::loading::LoadingPhase;
use crate::engine::scene::{
    MarkerDescriptor, MarkerSummary, RotationAnimation, SceneGraph, register_all_markers,
};
use crate::error::ArError;
use crate::input::InputAction;
use crate::ui::UiSink;
use crate::ui::presenter::{self, READY_STATUS, RESET_STATUS};

/// Mutable handles to the outside world for the duration of one event.
pub struct ArHost<'a> {
    pub ui: &'a mut dyn UiSink,
    pub scene: &'a mut dyn SceneGraph,
}

/// Drives the loading sequence and per-marker UI state.
///
/// Every handler runs to completion and leaves the UI consistent with the
/// session. Events that arrive before their phase are remembered and
/// replayed once the sequence catches up, so the phase never moves back.
#[derive(Resource, Debug)]
pub struct LifecycleController {
    config: ArConfig,
    registry: AssetRegistry,
    session: SessionState,
    phase: LoadingPhase,
    detected: BTreeSet<Letter>,
    registered: Vec<MarkerSummary>,
    spin: RotationAnimation,
    scene_loaded_pending: bool,
    render_start_pending: bool,
    settle_timer: Option<Timer>,
    gesture_timer: Option<Timer>,
}

impl LifecycleController {
    pub fn new(config: &ArConfig) -> Self {
        let registry = AssetRegistry::from_config(config);
        let session = SessionState::new(config.audio.enabled, registry.len());
        Self {
            config: config.clone(),
            registry,
            session,
            phase: LoadingPhase::AwaitingCamera,
            detected: BTreeSet::new(),
            registered: Vec::new(),
            spin: RotationAnimation::spin(config.animations.rotation_duration_ms),
            scene_loaded_pending: false,
            render_start_pending: false,
            settle_timer: None,
            gesture_timer: None,
        }
    }

    pub fn phase(&self) -> &LoadingPhase {
        &self.phase
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn config(&self) -> &ArConfig {
        &self.config
    }

    pub fn current_letter(&self) -> Option<Letter> {
        self.session.current_letter()
    }

    pub fn asset(&self, letter: Letter) -> Option<&LetterAsset> {
        self.registry.get(letter)
    }

    pub fn is_detected(&self, letter: Letter) -> bool {
        self.detected.contains(&letter)
    }

    pub fn registered_markers(&self) -> &[MarkerSummary] {
        &self.registered
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let progress = &self.session.progress;
        SessionSnapshot {
            current_letter: self.session.current_letter(),
            marker_detected: self.session.marker_detected(),
            audio_enabled: self.session.audio_enabled,
            gestures_enabled: self.session.gestures_enabled,
            loading_progress: progress.value(),
            phase: self.phase.clone(),
            detected_letters: self.detected.iter().copied().collect(),
            assets_loaded: progress.assets_loaded(),
            assets_failed: progress.assets_failed(),
            assets_total: progress.assets_total(),
        }
    }

    /// Paints the initial screen. Fails immediately without a scene root.
    pub fn start(&mut self, host: &mut ArHost<'_>) {
        info!("Starting AR session ({} letters)", self.registry.len());

        if !host.scene.has_scene_root() {
            self.fail(
                ArError::SceneInitialization("scene root element not found".to_string()),
                host,
            );
            return;
        }

        host.ui.set_progress(self.session.loading_progress());
        presenter::present_detected(host.ui, None);
        host.ui.set_status_text("Allow camera access to start");
        self.present_phase(host);
    }

    pub fn handle(&mut self, event: HostEvent, host: &mut ArHost<'_>) {
        match event {
            HostEvent::Camera(result) => self.on_camera_result(result, host),
            HostEvent::Scene(event) => self.on_scene_event(event, host),
            HostEvent::Marker(event) => self.on_marker_event(event, host),
            HostEvent::Asset(event) => self.on_asset_event(event, host),
            HostEvent::Key(key) => self.on_key(&key, host),
        }
    }

    pub fn on_camera_result(&mut self, result: CameraResult, host: &mut ArHost<'_>) {
        if self.phase != LoadingPhase::AwaitingCamera {
            debug!("Ignoring camera result in phase {}", self.phase.name());
            return;
        }

        match result {
            CameraResult::Granted => {
                info!("Camera access granted");
                self.advance(LoadingPhase::CameraGranted);
                let value = self.session.progress.camera_granted();
                host.ui.set_progress(value);
                self.present_phase(host);

                if std::mem::take(&mut self.scene_loaded_pending) {
                    self.scene_loaded(host);
                }
            }
            CameraResult::Denied { name, message } => {
                self.fail(ArError::CameraPermissionDenied { name, message }, host);
            }
        }
    }

    pub fn on_scene_event(&mut self, event: SceneEvent, host: &mut ArHost<'_>) {
        if self.phase.is_failed() {
            debug!("Ignoring scene event {:?} after failure", event);
            return;
        }

        match event {
            SceneEvent::Error(message) => self.fail(ArError::SceneRuntime(message), host),
            SceneEvent::Loaded => match self.phase {
                LoadingPhase::AwaitingCamera => {
                    debug!("Scene loaded before camera access, deferring");
                    self.scene_loaded_pending = true;
                }
                LoadingPhase::CameraGranted => self.scene_loaded(host),
                _ => debug!("Duplicate scene loaded event ignored"),
            },
            SceneEvent::RenderStart => {
                if self.phase.is_ready() {
                    debug!("Duplicate renderstart ignored");
                } else if self.phase.markers_registered() {
                    self.render_started(host);
                } else {
                    debug!("Render started before markers were registered, deferring");
                    self.render_start_pending = true;
                }
            }
        }
    }

    pub fn on_asset_event(&mut self, event: AssetEvent, host: &mut ArHost<'_>) {
        if !self.phase.markers_registered() {
            debug!("Ignoring {:?} in phase {}", event, self.phase.name());
            return;
        }

        let (letter, loaded) = match event {
            AssetEvent::ModelLoaded(letter) => {
                debug!("Model {} loaded", letter);
                (letter, true)
            }
            AssetEvent::ModelError { letter, message } => {
                warn!("{}", ArError::AssetLoad { letter, message });
                (letter, false)
            }
        };

        if !self.session.progress.asset_settled(letter, loaded) {
            return;
        }

        // Late models after the first frame do not move the bar.
        if self.advance(LoadingPhase::AssetsLoading) {
            let value = self.session.progress.interpolate_assets();
            host.ui.set_progress(value);
            self.present_phase(host);
        }
    }

    pub fn on_marker_event(&mut self, event: MarkerEvent, host: &mut ArHost<'_>) {
        match event {
            MarkerEvent::Found(letter) => self.marker_found(letter, host),
            MarkerEvent::Lost(letter) => self.marker_lost(letter, host),
            MarkerEvent::ModelClicked(letter) => self.model_clicked(letter, host),
        }
    }

    pub fn on_key(&mut self, key: &str, host: &mut ArHost<'_>) {
        match InputAction::from_key(key) {
            Some(InputAction::ToggleAudio) => {
                self.toggle_audio(host.ui);
            }
            Some(InputAction::ToggleGestures) => {
                self.toggle_gestures(host.ui);
            }
            None => {}
        }
    }

    /// Advances the settle and gesture-hint timers.
    pub fn tick(&mut self, delta: Duration, host: &mut ArHost<'_>) {
        if let Some(timer) = self.settle_timer.as_mut() {
            if timer.tick(delta).finished() {
                self.settle_timer = None;
                self.settled(host);
            }
        }

        if let Some(timer) = self.gesture_timer.as_mut() {
            if timer.tick(delta).finished() {
                self.gesture_timer = None;
                host.ui.hide_gesture_hint();
            }
        }
    }

    pub fn toggle_audio(&mut self, ui: &mut dyn UiSink) -> bool {
        let enabled = !self.session.audio_enabled;
        self.set_audio(enabled, ui)
    }

    pub fn toggle_gestures(&mut self, ui: &mut dyn UiSink) -> bool {
        let enabled = !self.session.gestures_enabled;
        self.set_gestures(enabled, ui)
    }

    pub fn set_audio(&mut self, enabled: bool, ui: &mut dyn UiSink) -> bool {
        self.session.audio_enabled = enabled;
        info!("Audio {}", if enabled { "enabled" } else { "disabled" });
        ui.set_status_text(&presenter::toggle_status("Audio", enabled));
        enabled
    }

    pub fn set_gestures(&mut self, enabled: bool, ui: &mut dyn UiSink) -> bool {
        self.session.gestures_enabled = enabled;
        info!("Gesture hints {}", if enabled { "enabled" } else { "disabled" });
        if !enabled {
            self.gesture_timer = None;
            ui.hide_gesture_hint();
        }
        ui.set_status_text(&presenter::toggle_status("Gestures", enabled));
        enabled
    }

    /// Stops every marker animation and resets the instruction line.
    pub fn reset_scene(&mut self, host: &mut ArHost<'_>) {
        info!("Resetting AR scene");
        for marker in &self.registered {
            host.scene.clear_animation(marker.letter);
        }
        host.ui.set_status_text(RESET_STATUS);
    }

    fn scene_loaded(&mut self, host: &mut ArHost<'_>) {
        info!("AR scene loaded");
        self.advance(LoadingPhase::SceneLoaded);
        let value = self.session.progress.scene_loaded();
        host.ui.set_progress(value);
        self.present_phase(host);

        match register_all_markers(&self.registry, &self.config, &mut *host.scene) {
            Ok(report) => {
                // Markers already in the scene are tracked like new ones.
                let present: BTreeSet<Letter> = report
                    .registered
                    .iter()
                    .chain(report.skipped.iter())
                    .copied()
                    .collect();
                self.registered = self
                    .registry
                    .iter()
                    .filter(|asset| present.contains(&asset.letter))
                    .map(|asset| MarkerDescriptor::new(asset, &self.config).summary())
                    .collect();
                self.advance(LoadingPhase::MarkersRegistered);
                self.present_phase(host);

                if std::mem::take(&mut self.render_start_pending) {
                    self.render_started(host);
                }
            }
            Err(err) => self.fail(err, host),
        }
    }

    fn render_started(&mut self, host: &mut ArHost<'_>) {
        info!("First frame rendered");
        self.advance(LoadingPhase::Ready);
        let value = self.session.progress.render_started();
        host.ui.set_progress(value);
        self.present_phase(host);
        self.settle_timer = Some(Timer::new(
            Duration::from_millis(self.config.animations.settle_delay_ms),
            TimerMode::Once,
        ));
    }

    fn settled(&mut self, host: &mut ArHost<'_>) {
        if !self.phase.is_ready() {
            debug!("Settle delay elapsed in phase {}, skipping", self.phase.name());
            return;
        }
        let value = self.session.progress.complete();
        host.ui.set_progress(value);
        host.ui.hide_loading_overlay();
        host.ui.set_status_text(READY_STATUS);
        info!("Loading complete");
    }

    fn marker_found(&mut self, letter: Letter, host: &mut ArHost<'_>) {
        info!("Marker {} found", letter);
        self.detected.insert(letter);
        self.session.set_current_letter(letter);

        let asset = self.registry.get(letter);
        presenter::present_detected(host.ui, asset);
        host.scene.start_animation(letter, &self.spin);

        if self.session.audio_enabled {
            if let Some(path) = asset.and_then(|a| a.audio_path.as_deref()) {
                host.scene.play_audio(path, self.config.audio.volume);
            }
        }

        if self.session.gestures_enabled {
            if let Some(asset) = asset {
                host.ui.show_gesture_hint(&presenter::gesture_hint_text(asset));
                self.gesture_timer = Some(Timer::new(
                    Duration::from_millis(self.config.animations.gesture_hint_ms),
                    TimerMode::Once,
                ));
            }
        }
    }

    // Replays the audio cue and brings the clicked letter back into the panel
    fn model_clicked(&mut self, letter: Letter, host: &mut ArHost<'_>) {
        info!("Model {} clicked", letter);
        let Some(asset) = self.registry.get(letter) else {
            return;
        };

        self.session.set_current_letter(letter);
        presenter::present_detected(host.ui, Some(asset));

        if self.session.audio_enabled {
            if let Some(path) = asset.audio_path.as_deref() {
                host.scene.play_audio(path, self.config.audio.volume);
            }
        }
    }

    fn marker_lost(&mut self, letter: Letter, host: &mut ArHost<'_>) {
        info!("Marker {} lost", letter);
        self.detected.remove(&letter);
        host.scene.clear_animation(letter);

        if self.session.clear_current_letter(letter) {
            presenter::present_detected(host.ui, None);
        }

        self.gesture_timer = None;
        host.ui.hide_gesture_hint();
    }

    fn fail(&mut self, error: ArError, host: &mut ArHost<'_>) {
        if !error.is_fatal() {
            warn!("{}", error);
            return;
        }
        if self.phase.is_failed() {
            debug!("Already failed, dropping {}", error);
            return;
        }
        error!("{}", error);
        self.phase = LoadingPhase::Failed(error.to_string());
        self.settle_timer = None;
        presenter::present_error(host.ui, &error);
        self.present_phase(host);
    }

    fn advance(&mut self, next: LoadingPhase) -> bool {
        if !self.phase.can_advance_to(&next) {
            debug!(
                "Refusing phase change {} -> {}",
                self.phase.name(),
                next.name()
            );
            return false;
        }
        if self.phase != next {
            info!("Loading phase {} -> {}", self.phase.name(), next.name());
            self.phase = next;
        }
        true
    }

    fn present_phase(&self, host: &mut ArHost<'_>) {
        let progress = &self.session.progress;
        presenter::present_phase(
            host.ui,
            &self.phase,
            progress.assets_settled(),
            progress.assets_total(),
        );
    }
}
