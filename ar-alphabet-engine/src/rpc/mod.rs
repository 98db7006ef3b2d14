//! JSON-RPC 2.0 control surface for the page and the browser console.
//!
//! Messages arrive through `window.postMessage` and replies go to the parent
//! window, so the engine can be driven from an embedding page. Replies,
//! echoes of our own notifications and unparseable text are never answered.
//! A top-level page has no parent to reply to; from its console use the
//! exported functions in `web::console` instead. Fire-and-forget calls
//! still work there:
//!
//! ```javascript
//! window.postMessage(JSON.stringify({
//!   jsonrpc: "2.0",
//!   method: "toggle_audio",
//!   params: {},
//!   id: 1
//! }), "*");
//! ```
//!
//! ## Methods
//!
//! ### Session toggles
//! - `toggle_audio`, `toggle_gestures`: flip the toggle, return the new value
//! - `set_audio`, `set_gestures`: `{ "enabled": bool }`
//!
//! ### Queries
//! - `get_current_letter`: most recently found letter, or `null`
//! - `get_state`: snapshot copy of the session
//! - `get_config`: resolved configuration
//! - `get_markers`: registered markers with their pattern and model paths
//! - `get_marker_preview`: `{ "letter": "A" }`, placeholder card grid and
//!   its ASCII rendering for printing
//!
//! ### Scene
//! - `reset_scene`: stop every model animation and reset the status text
//!
//! ## Notifications
//! - `phase_changed`: `{ phase, progress }`
//! - `marker_changed`: `{ current_letter }`
//!
//! ## Error codes
//! - `-32600`: Invalid request (`jsonrpc` is not `"2.0"`)
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error

/// Session copy read by the exported console functions.
pub mod console_state;

/// Request parsing, method dispatch and outgoing message queueing.
pub mod web_rpc;
