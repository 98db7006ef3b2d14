//! Browser adapters: DOM-backed scene graph, framework event listeners and
//! the camera permission request. Compiled for `wasm32` only.

/// `getUserMedia` permission request.
pub mod camera;

/// Console functions exported through `wasm_bindgen`.
pub mod console;

/// `SceneGraph` over the A-Frame document.
pub mod dom_scene;

/// Scene, keyboard and per-marker listeners feeding `HostEventQueue`.
pub mod event_bridge;

use bevy::prelude::*;

use crate::engine::core::session_systems::{SceneBinding, UiBinding};
use crate::engine::session::HostEventQueue;
use crate::ui::{NullUi, dom_ui::DomUi};

pub use camera::request_camera_access;
pub use console::install_console_bridge;
pub use event_bridge::attach_scene_listeners;

/// Binds the real DOM as the engine's UI and scene.
pub fn install_dom_bindings(world: &mut World) {
    let queue = world.resource::<HostEventQueue>().clone();

    let ui: Box<dyn crate::ui::UiSink> = match DomUi::new() {
        Ok(ui) => Box::new(ui),
        Err(err) => {
            error!("{}", err);
            Box::new(NullUi)
        }
    };
    world.insert_non_send_resource(UiBinding(ui));
    world.insert_non_send_resource(SceneBinding(Box::new(dom_scene::DomScene::new(queue))));
}
