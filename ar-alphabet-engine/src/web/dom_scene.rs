use bevy::prelude::*;
use constants::dom::SCENE_SELECTOR;
use web_sys::{Document, Element, HtmlAudioElement};

use super::event_bridge::{error_detail, listen};
use crate::engine::assets::Letter;
use crate::engine::scene::descriptor::{
    MarkerDescriptor, RotationAnimation, attribute_triple, marker_element_id, model_element_id,
};
use crate::engine::scene::SceneGraph;
use crate::engine::session::{AssetEvent, HostEvent, HostEventQueue, MarkerEvent};
use crate::error::ArError;

/// `SceneGraph` that builds `a-marker`/`a-entity` elements under `a-scene`.
pub struct DomScene {
    document: Option<Document>,
    queue: HostEventQueue,
}

impl DomScene {
    pub fn new(queue: HostEventQueue) -> Self {
        Self {
            document: web_sys::window().and_then(|w| w.document()),
            queue,
        }
    }

    fn scene_root(&self) -> Option<Element> {
        self.document
            .as_ref()?
            .query_selector(SCENE_SELECTOR)
            .ok()
            .flatten()
    }

    fn model(&self, letter: Letter) -> Option<Element> {
        self.document
            .as_ref()?
            .get_element_by_id(&model_element_id(letter))
    }

    fn build_marker(
        &self,
        document: &Document,
        descriptor: &MarkerDescriptor,
    ) -> Result<Element, wasm_bindgen::JsValue> {
        let marker = document.create_element("a-marker")?;
        marker.set_id(&descriptor.marker_id);
        marker.set_attribute("type", "pattern")?;
        marker.set_attribute("url", &descriptor.pattern_url)?;
        marker.set_attribute("emitevents", "true")?;

        let entity = document.create_element("a-entity")?;
        entity.set_id(&descriptor.entity_id);
        entity.set_attribute("gltf-model", &descriptor.model_attribute())?;
        entity.set_attribute("scale", &attribute_triple(descriptor.transform.scale))?;
        entity.set_attribute("position", &attribute_triple(descriptor.transform.position))?;
        entity.set_attribute("rotation", &attribute_triple(descriptor.transform.rotation))?;
        entity.set_attribute("animation-mixer", "")?;
        entity.set_attribute("animation", &descriptor.animation.attribute())?;

        marker.append_child(&entity)?;
        Ok(marker)
    }

    fn bind_callbacks(&self, marker: &Element, letter: Letter) -> Result<(), ArError> {
        let found = self.queue.clone();
        listen(marker, "markerFound", move |_| {
            found.push(HostEvent::Marker(MarkerEvent::Found(letter)));
        })?;

        let lost = self.queue.clone();
        listen(marker, "markerLost", move |_| {
            lost.push(HostEvent::Marker(MarkerEvent::Lost(letter)));
        })?;

        let Some(entity) = marker.first_element_child() else {
            return Err(ArError::Dom(format!("model entity for {letter} missing")));
        };

        let clicked = self.queue.clone();
        listen(&entity, "click", move |_| {
            clicked.push(HostEvent::Marker(MarkerEvent::ModelClicked(letter)));
        })?;

        let loaded = self.queue.clone();
        listen(&entity, "model-loaded", move |_| {
            loaded.push(HostEvent::Asset(AssetEvent::ModelLoaded(letter)));
        })?;

        let failed = self.queue.clone();
        listen(&entity, "model-error", move |event| {
            failed.push(HostEvent::Asset(AssetEvent::ModelError {
                letter,
                message: error_detail(&event),
            }));
        })
    }
}

impl SceneGraph for DomScene {
    fn has_scene_root(&self) -> bool {
        self.scene_root().is_some()
    }

    fn has_marker(&self, letter: Letter) -> bool {
        self.document
            .as_ref()
            .and_then(|d| d.get_element_by_id(&marker_element_id(letter)))
            .is_some()
    }

    fn append_marker(&mut self, descriptor: &MarkerDescriptor) -> Result<(), ArError> {
        let (Some(document), Some(scene)) = (self.document.as_ref(), self.scene_root()) else {
            return Err(ArError::SceneInitialization(
                "a-scene element not found".to_string(),
            ));
        };

        let marker = self
            .build_marker(document, descriptor)
            .map_err(|e| ArError::Dom(format!("building marker {}: {:?}", descriptor.letter, e)))?;
        self.bind_callbacks(&marker, descriptor.letter)?;
        scene
            .append_child(&marker)
            .map_err(|e| ArError::Dom(format!("attaching marker {}: {:?}", descriptor.letter, e)))?;
        Ok(())
    }

    fn start_animation(&mut self, letter: Letter, animation: &RotationAnimation) {
        if let Some(model) = self.model(letter) {
            if let Err(e) = model.set_attribute("animation", &animation.attribute()) {
                warn!("Failed to animate model {}: {:?}", letter, e);
            }
        }
    }

    fn clear_animation(&mut self, letter: Letter) {
        if let Some(model) = self.model(letter) {
            if let Err(e) = model.remove_attribute("animation") {
                warn!("Failed to stop animation of model {}: {:?}", letter, e);
            }
        }
    }

    fn play_audio(&mut self, path: &str, volume: f64) {
        match HtmlAudioElement::new_with_src(path) {
            Ok(audio) => {
                audio.set_volume(volume);
                // Autoplay rejections surface as a rejected promise; nothing to retry.
                if let Err(e) = audio.play() {
                    warn!("Failed to play {}: {:?}", path, e);
                }
            }
            Err(e) => warn!("Failed to create audio element for {}: {:?}", path, e),
        }
    }
}
