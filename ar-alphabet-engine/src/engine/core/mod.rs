//! Core application setup and host state.
//!
//! Wires the session, the host adapters and the control surface into a
//! headless Bevy app for both native and WASM targets.

/// App construction and the engine plugin.
pub mod app_setup;

/// Host state: configuration loading, then running.
pub mod app_state;

/// Systems bridging Bevy resources to the lifecycle controller.
pub mod session_systems;
