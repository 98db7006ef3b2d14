use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::assets::Letter;
use crate::engine::assets::marker_pattern::{GRID_SIZE, preview_grid, render_ascii};
use crate::engine::core::session_systems::{SceneBinding, UiBinding, bind_host};
use crate::engine::session::{ArHost, LifecycleController};
use crate::rpc::console_state::{ConsoleState, publish_console_state};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing notifications and responses, flushed once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    /// Notifications waiting for this frame's send.
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    /// Responses waiting for this frame's send.
    pub fn pending_responses(&self) -> &[RpcResponse] {
        &self.outgoing_responses
    }
}

/// Raw message strings received from `postMessage`.
#[derive(Resource, Clone, Default)]
pub struct RpcMessageQueue(Arc<Mutex<Vec<String>>>);

impl RpcMessageQueue {
    pub fn push(&self, message: String) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(message);
        }
    }

    fn drain(&self) -> Vec<String> {
        if let Ok(mut queue) = self.0.lock() {
            std::mem::take(&mut *queue)
        } else {
            Vec::new()
        }
    }
}

/// Plugin establishing the JSON-RPC control surface.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .init_resource::<RpcMessageQueue>()
            .init_resource::<ConsoleState>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                    publish_console_state,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(message_queue: Res<RpcMessageQueue>) {
    let queue = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Only string payloads that look like JSON-RPC are queued.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
            if message_str.contains("jsonrpc") {
                queue.push(message_str);
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    match window() {
        Some(window) => {
            if let Err(e) = window
                .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Failed to register message listener: {:?}", e);
            }
        }
        None => error!("Window object not available"),
    }

    // Listener lives for the page session.
    closure.forget();
}

/// Event representing one incoming RPC message.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

/// Notifications this engine emits; seeing one come back means it was
/// posted to our own window.
const OUTGOING_NOTIFICATIONS: [&str; 2] = ["phase_changed", "marker_changed"];

/// Whether `message` is a call for us rather than a reply or an echo of our
/// own traffic. Unparseable text is passed through so it gets logged.
fn is_incoming_call(message: &str) -> bool {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(message) else {
        return true;
    };
    match value.get("method").and_then(|m| m.as_str()) {
        Some(method) => !OUTGOING_NOTIFICATIONS.contains(&method),
        None => false,
    }
}

fn process_incoming_messages(
    message_queue: Res<RpcMessageQueue>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    for message_str in message_queue.drain() {
        if !is_incoming_call(&message_str) {
            continue;
        }
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut message_events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut controller: Option<ResMut<LifecycleController>>,
    mut ui: NonSendMut<UiBinding>,
    mut scene: NonSendMut<SceneBinding>,
) {
    let mut host = bind_host(&mut ui, &mut scene);

    for event in message_events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                let response =
                    handle_rpc_request(&request, controller.as_deref_mut(), &mut host);
                if let Some(response) = response {
                    rpc_interface.queue_response(response);
                }
            }
            // No usable id, so there is nobody to answer.
            Err(parse_error) => warn!("Unparseable RPC message: {}", parse_error),
        }
    }
}

/// Handle one RPC request. Notifications (no `id`) are executed but get no
/// response.
pub fn handle_rpc_request(
    request: &RpcRequest,
    controller: Option<&mut LifecycleController>,
    host: &mut ArHost<'_>,
) -> Option<RpcResponse> {
    let result = match controller {
        _ if request.jsonrpc != "2.0" => Err(RpcError {
            code: -32600,
            message: "Invalid request".to_string(),
            data: Some(serde_json::json!({ "jsonrpc": request.jsonrpc })),
        }),
        Some(controller) => dispatch_method(request, controller, host),
        None => Err(RpcError::internal_error("Session not started")),
    };

    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn dispatch_method(
    request: &RpcRequest,
    controller: &mut LifecycleController,
    host: &mut ArHost<'_>,
) -> Result<serde_json::Value, RpcError> {
    match request.method.as_str() {
        "toggle_audio" => Ok(serde_json::json!({
            "audio_enabled": controller.toggle_audio(host.ui)
        })),
        "toggle_gestures" => Ok(serde_json::json!({
            "gestures_enabled": controller.toggle_gestures(host.ui)
        })),
        "set_audio" => {
            let enabled = parse_enabled(&request.params)?;
            Ok(serde_json::json!({
                "audio_enabled": controller.set_audio(enabled, host.ui)
            }))
        }
        "set_gestures" => {
            let enabled = parse_enabled(&request.params)?;
            Ok(serde_json::json!({
                "gestures_enabled": controller.set_gestures(enabled, host.ui)
            }))
        }
        "get_current_letter" => handle_get_current_letter(controller),
        "get_state" => to_result(&controller.snapshot()),
        "get_config" => to_result(controller.config()),
        "get_markers" => to_result(controller.registered_markers()),
        "get_marker_preview" => {
            let letter = parse_letter(&request.params)?;
            Ok(marker_preview(letter))
        }
        "reset_scene" => {
            controller.reset_scene(host);
            Ok(serde_json::json!({ "success": true }))
        }
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError {
                code: -32601,
                message: "Method not found".to_string(),
                data: Some(serde_json::json!({ "method": request.method })),
            })
        }
    }
}

fn parse_enabled(params: &serde_json::Value) -> Result<bool, RpcError> {
    #[derive(serde::Deserialize)]
    struct EnabledParams {
        enabled: bool,
    }

    serde_json::from_value::<EnabledParams>(params.clone())
        .map(|p| p.enabled)
        .map_err(|_| RpcError::invalid_params("Expected boolean 'enabled' parameter"))
}

fn parse_letter(params: &serde_json::Value) -> Result<Letter, RpcError> {
    #[derive(serde::Deserialize)]
    struct LetterParams {
        letter: Letter,
    }

    serde_json::from_value::<LetterParams>(params.clone())
        .map(|p| p.letter)
        .map_err(|_| RpcError::invalid_params("Expected a single letter 'letter' parameter"))
}

/// Placeholder card for `letter` as cell rows plus printable text.
pub fn marker_preview(letter: Letter) -> serde_json::Value {
    let grid = preview_grid(letter);
    serde_json::json!({
        "letter": letter,
        "size": GRID_SIZE,
        "rows": grid,
        "ascii": render_ascii(&grid),
    })
}

fn handle_get_current_letter(
    controller: &LifecycleController,
) -> Result<serde_json::Value, RpcError> {
    let letter = controller.current_letter();
    let display_name = letter
        .and_then(|l| controller.asset(l))
        .map(|asset| asset.display_name());

    Ok(serde_json::json!({
        "current_letter": letter,
        "display_name": display_name,
    }))
}

fn to_result<T: Serialize + ?Sized>(value: &T) -> Result<serde_json::Value, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError::internal_error(&e.to_string()))
}

/// Send queued notifications and responses to the parent window.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Responses after notifications to keep state updates ahead of replies.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = window() else {
            error!("Window object not available");
            return;
        };
        // A top-level page is its own parent; posting there would loop back
        // into our listener.
        let Some(parent) = window
            .parent()
            .ok()
            .flatten()
            .filter(|parent| !js_sys::Object::is(parent.as_ref(), window.as_ref()))
        else {
            debug!("No embedding page, message not posted");
            return;
        };

        match serde_json::to_string(message) {
            Ok(json) => {
                if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                    error!("Failed to send message to parent: {:?}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::ArConfig;
    use crate::engine::scene::RecordingScene;
    use crate::engine::session::{CameraResult, HostEvent, MarkerEvent, SceneEvent};
    use crate::ui::RecordingUi;

    fn request(method: &str, params: serde_json::Value) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: Some(serde_json::json!(7)),
        }
    }

    fn call(
        controller: &mut LifecycleController,
        ui: &mut RecordingUi,
        scene: &mut RecordingScene,
        request: &RpcRequest,
    ) -> RpcResponse {
        let mut host = ArHost { ui, scene };
        handle_rpc_request(request, Some(controller), &mut host).expect("response")
    }

    #[test]
    fn toggles_and_reads_state() {
        let mut controller = LifecycleController::new(&ArConfig::default());
        let mut ui = RecordingUi::new();
        let mut scene = RecordingScene::new();

        let response = call(
            &mut controller,
            &mut ui,
            &mut scene,
            &request("toggle_audio", serde_json::Value::Null),
        );
        assert_eq!(
            response.result,
            Some(serde_json::json!({ "audio_enabled": true }))
        );

        let response = call(
            &mut controller,
            &mut ui,
            &mut scene,
            &request("get_state", serde_json::Value::Null),
        );
        let state = response.result.expect("state");
        assert_eq!(state["audio_enabled"], true);
        assert_eq!(state["gestures_enabled"], true);
        assert_eq!(state["phase"]["phase"], "awaiting_camera");
    }

    #[test]
    fn current_letter_includes_display_name() {
        let mut controller = LifecycleController::new(&ArConfig::default());
        let mut ui = RecordingUi::new();
        let mut scene = RecordingScene::new();
        let letter = Letter::from_char('Z').expect("letter");
        controller.handle(
            HostEvent::Marker(MarkerEvent::Found(letter)),
            &mut ArHost {
                ui: &mut ui,
                scene: &mut scene,
            },
        );

        let response = call(
            &mut controller,
            &mut ui,
            &mut scene,
            &request("get_current_letter", serde_json::Value::Null),
        );
        assert_eq!(
            response.result,
            Some(serde_json::json!({ "current_letter": "Z", "display_name": "Z - Zebra" }))
        );
    }

    #[test]
    fn set_gestures_validates_params() {
        let mut controller = LifecycleController::new(&ArConfig::default());
        let mut ui = RecordingUi::new();
        let mut scene = RecordingScene::new();

        let response = call(
            &mut controller,
            &mut ui,
            &mut scene,
            &request("set_gestures", serde_json::json!({ "enabled": "yes" })),
        );
        assert_eq!(response.error.map(|e| e.code), Some(-32602));

        let response = call(
            &mut controller,
            &mut ui,
            &mut scene,
            &request("set_gestures", serde_json::json!({ "enabled": false })),
        );
        assert_eq!(
            response.result,
            Some(serde_json::json!({ "gestures_enabled": false }))
        );
        assert!(!controller.session().gestures_enabled);
    }

    #[test]
    fn markers_are_listed_after_registration() {
        let mut controller = LifecycleController::new(&ArConfig::default());
        let mut ui = RecordingUi::new();
        let mut scene = RecordingScene::new();
        {
            let mut host = ArHost {
                ui: &mut ui,
                scene: &mut scene,
            };
            controller.handle(HostEvent::Camera(CameraResult::Granted), &mut host);
            controller.handle(HostEvent::Scene(SceneEvent::Loaded), &mut host);
        }

        let response = call(
            &mut controller,
            &mut ui,
            &mut scene,
            &request("get_markers", serde_json::Value::Null),
        );
        let markers = response.result.expect("markers");
        let markers = markers.as_array().expect("array");
        assert_eq!(markers.len(), 26);
        assert_eq!(markers[0]["pattern_url"], "assets/markers/pattern-A.patt");
    }

    #[test]
    fn unknown_method_and_missing_session_are_errors() {
        let mut controller = LifecycleController::new(&ArConfig::default());
        let mut ui = RecordingUi::new();
        let mut scene = RecordingScene::new();

        let response = call(
            &mut controller,
            &mut ui,
            &mut scene,
            &request("launch_rockets", serde_json::Value::Null),
        );
        assert_eq!(response.error.map(|e| e.code), Some(-32601));

        let mut host = ArHost {
            ui: &mut ui,
            scene: &mut scene,
        };
        let response =
            handle_rpc_request(&request("get_state", serde_json::Value::Null), None, &mut host)
                .expect("response");
        assert_eq!(response.error.map(|e| e.code), Some(-32603));
    }

    fn rpc_app() -> App {
        let mut app = App::new();
        app.init_resource::<WebRpcInterface>()
            .init_resource::<RpcMessageQueue>()
            .add_event::<IncomingRpcMessage>()
            .insert_resource(LifecycleController::new(&ArConfig::default()))
            .insert_non_send_resource(UiBinding(Box::new(RecordingUi::new())))
            .insert_non_send_resource(SceneBinding(Box::new(RecordingScene::new())))
            .add_systems(Update, (process_incoming_messages, handle_rpc_messages).chain());
        app
    }

    fn receive(app: &mut App, message: &str) -> usize {
        app.world()
            .resource::<RpcMessageQueue>()
            .push(message.to_string());
        app.update();
        app.world()
            .resource::<WebRpcInterface>()
            .pending_responses()
            .len()
    }

    #[test]
    fn own_replies_and_echoes_are_not_answered() {
        let mut app = rpc_app();
        assert_eq!(
            receive(&mut app, r#"{"jsonrpc":"2.0","method":"get_state","id":1}"#),
            1
        );

        let interface = app.world().resource::<WebRpcInterface>();
        let reply = serde_json::to_string(&interface.pending_responses()[0]).expect("serialize reply");
        assert_eq!(receive(&mut app, &reply), 1);

        let error_reply = serde_json::to_string(&RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(RpcError::internal_error("boom")),
            id: Some(serde_json::Value::Null),
        })
        .expect("serialize error");
        assert_eq!(receive(&mut app, &error_reply), 1);

        let echo = r#"{"jsonrpc":"2.0","method":"phase_changed","params":{"phase":{"phase":"ready"}}}"#;
        assert_eq!(receive(&mut app, echo), 1);
        assert_eq!(receive(&mut app, "{ not json"), 1);
        assert_eq!(
            receive(&mut app, r#"{"jsonrpc":"2.0","method":"toggle_audio","id":null}"#),
            1
        );
        assert!(app.world().resource::<LifecycleController>().session().audio_enabled);
    }

    #[test]
    fn wrong_protocol_version_is_an_invalid_request() {
        let mut controller = LifecycleController::new(&ArConfig::default());
        let mut ui = RecordingUi::new();
        let mut scene = RecordingScene::new();
        let mut old = request("get_state", serde_json::Value::Null);
        old.jsonrpc = "1.0".to_string();

        let response = call(&mut controller, &mut ui, &mut scene, &old);
        assert_eq!(response.error.map(|e| e.code), Some(-32600));
    }

    #[test]
    fn marker_preview_returns_printable_card() {
        let mut controller = LifecycleController::new(&ArConfig::default());
        let mut ui = RecordingUi::new();
        let mut scene = RecordingScene::new();

        let response = call(
            &mut controller,
            &mut ui,
            &mut scene,
            &request("get_marker_preview", serde_json::json!({ "letter": "B" })),
        );
        let preview = response.result.expect("preview");
        assert_eq!(preview["letter"], "B");
        assert_eq!(preview["size"], 16);
        assert_eq!(preview["rows"].as_array().map(|r| r.len()), Some(16));
        let ascii = preview["ascii"].as_str().expect("ascii");
        assert_eq!(ascii.lines().next(), Some("################"));

        let response = call(
            &mut controller,
            &mut ui,
            &mut scene,
            &request("get_marker_preview", serde_json::json!({ "letter": "7" })),
        );
        assert_eq!(response.error.map(|e| e.code), Some(-32602));
    }

    #[test]
    fn notifications_get_no_response() {
        let mut controller = LifecycleController::new(&ArConfig::default());
        let mut ui = RecordingUi::new();
        let mut scene = RecordingScene::new();
        let mut notification = request("toggle_gestures", serde_json::Value::Null);
        notification.id = None;

        let mut host = ArHost {
            ui: &mut ui,
            scene: &mut scene,
        };
        assert!(handle_rpc_request(&notification, Some(&mut controller), &mut host).is_none());
        assert!(!controller.session().gestures_enabled);
    }
}
