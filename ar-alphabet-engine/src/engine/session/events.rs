use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::engine::assets::Letter;

/// Outcome of the media-devices permission request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraResult {
    Granted,
    /// Carries the platform error's `name` and `message`.
    Denied { name: String, message: String },
}

/// Scene-level events emitted by the AR framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneEvent {
    Loaded,
    RenderStart,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerEvent {
    Found(Letter),
    Lost(Letter),
    /// Tap or click on the letter's model entity.
    ModelClicked(Letter),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetEvent {
    ModelLoaded(Letter),
    ModelError { letter: Letter, message: String },
}

/// Anything the browser or the framework reports back to the engine.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Camera(CameraResult),
    Scene(SceneEvent),
    Marker(MarkerEvent),
    Asset(AssetEvent),
    /// `KeyboardEvent.key` of a key press.
    Key(String),
}

/// Queue filled by JS callbacks and drained once per frame.
#[derive(Resource, Clone, Default)]
pub struct HostEventQueue(Arc<Mutex<Vec<HostEvent>>>);

impl HostEventQueue {
    pub fn push(&self, event: HostEvent) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(event);
        }
    }

    pub fn drain(&self) -> Vec<HostEvent> {
        if let Ok(mut queue) = self.0.lock() {
            std::mem::take(&mut *queue)
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_clones_share_storage_and_drain_in_order() {
        let queue = HostEventQueue::default();
        let producer = queue.clone();
        producer.push(HostEvent::Scene(SceneEvent::Loaded));
        producer.push(HostEvent::Key("a".into()));

        assert_eq!(
            queue.drain(),
            vec![HostEvent::Scene(SceneEvent::Loaded), HostEvent::Key("a".into())]
        );
        assert!(queue.drain().is_empty());
    }
}
