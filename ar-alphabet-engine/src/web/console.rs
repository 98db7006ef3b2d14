//! Functions exported to JavaScript for driving the engine from the browser
//! console. `index.html` copies them onto `window` once the module starts.
//!
//! Commands are queued as JSON-RPC notifications and applied on the next
//! frame; getters read the copy the engine publishes after each change.

use std::sync::OnceLock;

use bevy::prelude::*;
use constants::alphabet::ALPHABET;
use wasm_bindgen::prelude::*;

use crate::engine::assets::Letter;
use crate::engine::assets::marker_pattern::{preview_grid, render_ascii};
use crate::rpc::console_state::ConsoleState;
use crate::rpc::web_rpc::RpcMessageQueue;

struct ConsoleBridge {
    rpc: RpcMessageQueue,
    state: ConsoleState,
}

static BRIDGE: OnceLock<ConsoleBridge> = OnceLock::new();

pub fn install_console_bridge(rpc: Res<RpcMessageQueue>, state: Res<ConsoleState>) {
    let bridge = ConsoleBridge {
        rpc: rpc.clone(),
        state: state.clone(),
    };
    if BRIDGE.set(bridge).is_err() {
        warn!("Console bridge already installed");
    }
}

fn notify(method: &str, params: serde_json::Value) {
    let Some(bridge) = BRIDGE.get() else {
        warn!("Engine not started, '{}' ignored", method);
        return;
    };
    let message = serde_json::json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
    });
    bridge.rpc.push(message.to_string());
}

fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    serde_json::to_string(value)
        .ok()
        .and_then(|json| js_sys::JSON::parse(&json).ok())
        .unwrap_or(JsValue::NULL)
}

#[wasm_bindgen(js_name = resetScene)]
pub fn reset_scene() {
    notify("reset_scene", serde_json::json!({}));
}

#[wasm_bindgen(js_name = toggleAudio)]
pub fn toggle_audio() {
    notify("toggle_audio", serde_json::json!({}));
}

#[wasm_bindgen(js_name = toggleGestures)]
pub fn toggle_gestures() {
    notify("toggle_gestures", serde_json::json!({}));
}

#[wasm_bindgen(js_name = setAudio)]
pub fn set_audio(enabled: bool) {
    notify("set_audio", serde_json::json!({ "enabled": enabled }));
}

#[wasm_bindgen(js_name = setGestures)]
pub fn set_gestures(enabled: bool) {
    notify("set_gestures", serde_json::json!({ "enabled": enabled }));
}

/// Session snapshot as of the last frame, or `null` before the session starts.
#[wasm_bindgen(js_name = getState)]
pub fn get_state() -> JsValue {
    BRIDGE
        .get()
        .and_then(|bridge| bridge.state.latest().snapshot)
        .map(|snapshot| to_js(&snapshot))
        .unwrap_or(JsValue::NULL)
}

#[wasm_bindgen(js_name = getCurrentLetter)]
pub fn get_current_letter() -> Option<String> {
    let snapshot = BRIDGE.get()?.state.latest().snapshot?;
    snapshot.current_letter.map(String::from)
}

/// Registered markers with their pattern and model paths.
#[wasm_bindgen(js_name = getMarkers)]
pub fn get_markers() -> JsValue {
    match BRIDGE.get() {
        Some(bridge) => to_js(&bridge.state.latest().markers),
        None => JsValue::NULL,
    }
}

/// Resolved configuration.
#[wasm_bindgen(js_name = getConfig)]
pub fn get_config() -> JsValue {
    match BRIDGE.get() {
        Some(bridge) => to_js(&bridge.state.latest().config),
        None => JsValue::NULL,
    }
}

#[wasm_bindgen(js_name = alphabets)]
pub fn alphabets() -> Vec<String> {
    ALPHABET.iter().map(|c| c.to_string()).collect()
}

/// Printable placeholder card for `letter`, `undefined` for anything else.
#[wasm_bindgen(js_name = markerPreview)]
pub fn marker_preview(letter: &str) -> Option<String> {
    let letter = Letter::try_from(letter.to_string()).ok()?;
    Some(render_ascii(&preview_grid(letter)))
}
