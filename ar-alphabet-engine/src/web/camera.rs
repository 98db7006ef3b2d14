use bevy::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{DomException, MediaStream, MediaStreamConstraints, MediaStreamTrack};

use crate::engine::assets::ArConfig;
use crate::engine::assets::config::CameraConfig;
use crate::engine::session::{CameraResult, HostEvent, HostEventQueue};

/// Asks for camera access once the session is running.
pub fn request_camera_access(config: Res<ArConfig>, queue: Res<HostEventQueue>) {
    let camera = config.camera.clone();
    let queue = queue.clone();

    wasm_bindgen_futures::spawn_local(async move {
        let result = probe_camera(&camera).await;
        queue.push(HostEvent::Camera(result));
    });
}

/// Requests the stream and stops it straight away; the AR framework opens
/// its own capture.
async fn probe_camera(camera: &CameraConfig) -> CameraResult {
    match get_user_media(camera).await {
        Ok(stream) => {
            for track in stream.get_tracks().iter() {
                if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                    track.stop();
                }
            }
            CameraResult::Granted
        }
        Err(err) => denied(&err),
    }
}

async fn get_user_media(camera: &CameraConfig) -> Result<MediaStream, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window not available"))?;
    let media_devices = window.navigator().media_devices()?;

    let video = serde_json::json!({
        "facingMode": camera.facing_mode,
        "width": { "ideal": camera.width },
        "height": { "ideal": camera.height },
    });
    let video = js_sys::JSON::parse(&video.to_string())?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&video);
    constraints.set_audio(&JsValue::FALSE);

    let promise = media_devices.get_user_media_with_constraints(&constraints)?;
    JsFuture::from(promise).await?.dyn_into::<MediaStream>()
}

fn denied(err: &JsValue) -> CameraResult {
    let (name, message) = match err.dyn_ref::<DomException>() {
        Some(exception) => (exception.name(), exception.message()),
        None => (
            "Error".to_string(),
            err.as_string().unwrap_or_else(|| format!("{err:?}")),
        ),
    };
    warn!("Camera request failed: {}: {}", name, message);
    CameraResult::Denied { name, message }
}
