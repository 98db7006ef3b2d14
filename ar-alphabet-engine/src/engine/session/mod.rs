//! Session state and the lifecycle controller that mutates it.

/// Framework and browser events plus the queue JS callbacks write into.
pub mod events;

/// Loading-sequence state machine and per-marker handling.
pub mod lifecycle;

/// `SessionState` and its serializable snapshot.
pub mod state;

pub use events::{AssetEvent, CameraResult, HostEvent, HostEventQueue, MarkerEvent, SceneEvent};
pub use lifecycle::{ArHost, LifecycleController};
pub use state::{SessionSnapshot, SessionState};
