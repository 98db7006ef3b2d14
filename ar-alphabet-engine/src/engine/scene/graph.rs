use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use super::descriptor::{MarkerDescriptor, RotationAnimation};
use crate::engine::assets::Letter;
use crate::error::ArError;

/// Operations the engine needs from the external AR scene framework.
///
/// Detection, tracking and rendering stay inside the framework; this trait
/// only covers building the scene graph and poking at registered entities.
pub trait SceneGraph {
    /// Whether the scene root element exists.
    fn has_scene_root(&self) -> bool;

    fn has_marker(&self, letter: Letter) -> bool;

    /// Creates the marker and its model entity and binds their callbacks.
    fn append_marker(&mut self, descriptor: &MarkerDescriptor) -> Result<(), ArError>;

    fn start_animation(&mut self, letter: Letter, animation: &RotationAnimation);

    fn clear_animation(&mut self, letter: Letter);

    fn play_audio(&mut self, path: &str, volume: f64);
}

/// Everything a `RecordingScene` has been asked to do.
#[derive(Debug, Default)]
pub struct SceneLog {
    pub root_present: bool,
    pub markers: Vec<MarkerDescriptor>,
    pub animating: BTreeSet<Letter>,
    pub animation_starts: Vec<Letter>,
    pub audio: Vec<String>,
}

impl SceneLog {
    pub fn registered_letters(&self) -> Vec<Letter> {
        self.markers.iter().map(|m| m.letter).collect()
    }
}

/// In-memory scene used by tests and headless runs.
///
/// Clones share the same log so a test can keep a handle after moving the
/// scene into the app.
#[derive(Debug, Clone)]
pub struct RecordingScene {
    log: Rc<RefCell<SceneLog>>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(SceneLog {
                root_present: true,
                ..Default::default()
            })),
        }
    }

    /// A scene whose root element is missing.
    pub fn without_root() -> Self {
        let scene = Self::new();
        scene.log.borrow_mut().root_present = false;
        scene
    }

    pub fn log(&self) -> std::cell::Ref<'_, SceneLog> {
        self.log.borrow()
    }
}

impl Default for RecordingScene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph for RecordingScene {
    fn has_scene_root(&self) -> bool {
        self.log.borrow().root_present
    }

    fn has_marker(&self, letter: Letter) -> bool {
        self.log.borrow().markers.iter().any(|m| m.letter == letter)
    }

    fn append_marker(&mut self, descriptor: &MarkerDescriptor) -> Result<(), ArError> {
        let mut log = self.log.borrow_mut();
        if !log.root_present {
            return Err(ArError::SceneInitialization(
                "scene root not found".to_string(),
            ));
        }
        log.markers.push(descriptor.clone());
        Ok(())
    }

    fn start_animation(&mut self, letter: Letter, _animation: &RotationAnimation) {
        let mut log = self.log.borrow_mut();
        log.animating.insert(letter);
        log.animation_starts.push(letter);
    }

    fn clear_animation(&mut self, letter: Letter) {
        self.log.borrow_mut().animating.remove(&letter);
    }

    fn play_audio(&mut self, path: &str, _volume: f64) {
        self.log.borrow_mut().audio.push(path.to_string());
    }
}
