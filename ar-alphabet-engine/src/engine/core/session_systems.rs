use bevy::prelude::*;

use crate::engine::assets::ArConfig;
use crate::engine::scene::SceneGraph;
use crate::engine::session::{ArHost, HostEvent, HostEventQueue, LifecycleController};
use crate::rpc::web_rpc::WebRpcInterface;
use crate::ui::UiSink;

/// Main-thread UI sink. Non-send because DOM handles are not `Send`.
pub struct UiBinding(pub Box<dyn UiSink>);

/// Main-thread scene graph.
pub struct SceneBinding(pub Box<dyn SceneGraph>);

pub fn bind_host<'a>(ui: &'a mut UiBinding, scene: &'a mut SceneBinding) -> ArHost<'a> {
    ArHost {
        ui: ui.0.as_mut(),
        scene: scene.0.as_mut(),
    }
}

/// Creates the controller from the resolved configuration and paints the
/// first frame of UI.
pub fn start_session(
    mut commands: Commands,
    config: Res<ArConfig>,
    mut ui: NonSendMut<UiBinding>,
    mut scene: NonSendMut<SceneBinding>,
) {
    let mut controller = LifecycleController::new(&config);
    let mut host = bind_host(&mut ui, &mut scene);
    controller.start(&mut host);
    commands.insert_resource(controller);
}

/// Moves events queued by JS callbacks into the Bevy event stream.
pub fn drain_host_queue(queue: Res<HostEventQueue>, mut host_events: EventWriter<HostEvent>) {
    for event in queue.drain() {
        host_events.write(event);
    }
}

/// Feeds host events to the controller one at a time and reports phase and
/// letter changes to the control surface.
pub fn dispatch_host_events(
    mut events: EventReader<HostEvent>,
    mut controller: ResMut<LifecycleController>,
    mut ui: NonSendMut<UiBinding>,
    mut scene: NonSendMut<SceneBinding>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let mut host = bind_host(&mut ui, &mut scene);

    for event in events.read() {
        let phase_before = controller.phase().clone();
        let letter_before = controller.current_letter();

        controller.handle(event.clone(), &mut host);

        if *controller.phase() != phase_before {
            rpc_interface.send_notification(
                "phase_changed",
                serde_json::json!({
                    "phase": controller.phase(),
                    "progress": controller.session().loading_progress(),
                }),
            );
        }
        if controller.current_letter() != letter_before {
            rpc_interface.send_notification(
                "marker_changed",
                serde_json::json!({ "current_letter": controller.current_letter() }),
            );
        }
    }
}

pub fn tick_lifecycle_timers(
    time: Res<Time>,
    mut controller: ResMut<LifecycleController>,
    mut ui: NonSendMut<UiBinding>,
    mut scene: NonSendMut<SceneBinding>,
) {
    let mut host = bind_host(&mut ui, &mut scene);
    controller.tick(time.delta(), &mut host);
}
