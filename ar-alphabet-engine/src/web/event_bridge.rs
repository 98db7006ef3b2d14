use bevy::prelude::*;
use constants::dom::SCENE_SELECTOR;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, Event, EventTarget, KeyboardEvent};

use crate::engine::session::{HostEvent, HostEventQueue, SceneEvent};
use crate::error::ArError;

/// Registers `handler` for `event_type` for the rest of the page session.
pub fn listen(
    target: &EventTarget,
    event_type: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), ArError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
        .map_err(|e| ArError::Dom(format!("failed to listen for '{event_type}': {e:?}")))?;
    closure.forget();
    Ok(())
}

/// Best-effort message from a framework error event's `detail`.
pub fn error_detail(event: &Event) -> String {
    let Some(detail) = event.dyn_ref::<CustomEvent>().map(|e| e.detail()) else {
        return "unknown error".to_string();
    };
    if let Some(text) = detail.as_string() {
        return text;
    }
    for key in ["message", "error", "src"] {
        if let Ok(value) = js_sys::Reflect::get(&detail, &JsValue::from_str(key)) {
            if let Some(text) = value.as_string() {
                return text;
            }
        }
    }
    "unknown error".to_string()
}

fn flag(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .map(|v| v.is_truthy())
        .unwrap_or(false)
}

/// Subscribes to scene lifecycle events and key presses.
///
/// A scene that already finished loading (or rendering) before the engine
/// started is reported immediately.
pub fn attach_scene_listeners(queue: Res<HostEventQueue>) {
    if let Err(err) = try_attach_scene_listeners(&queue) {
        error!("{}", err);
    }
}

fn try_attach_scene_listeners(queue: &HostEventQueue) -> Result<(), ArError> {
    let window = web_sys::window().ok_or_else(|| ArError::Dom("window not available".into()))?;
    let document = window
        .document()
        .ok_or_else(|| ArError::Dom("document not available".into()))?;

    let key_queue = queue.clone();
    listen(&window, "keydown", move |event| {
        if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(|k| k.key()) {
            key_queue.push(HostEvent::Key(key));
        }
    })?;

    // Missing scene root is reported by the controller at startup.
    let Some(scene) = document.query_selector(SCENE_SELECTOR).ok().flatten() else {
        return Ok(());
    };

    let loaded_queue = queue.clone();
    listen(&scene, "loaded", move |_| {
        loaded_queue.push(HostEvent::Scene(SceneEvent::Loaded));
    })?;

    let render_queue = queue.clone();
    listen(&scene, "renderstart", move |_| {
        render_queue.push(HostEvent::Scene(SceneEvent::RenderStart));
    })?;

    let error_queue = queue.clone();
    listen(&scene, "error", move |event| {
        error_queue.push(HostEvent::Scene(SceneEvent::Error(error_detail(&event))));
    })?;

    if flag(&scene, "hasLoaded") {
        queue.push(HostEvent::Scene(SceneEvent::Loaded));
    }
    if flag(&scene, "renderStarted") {
        queue.push(HostEvent::Scene(SceneEvent::RenderStart));
    }

    info!("Scene listeners attached");
    Ok(())
}
