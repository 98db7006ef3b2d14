//! Scene graph seam and marker registration.
//!
//! The AR framework owns detection and rendering. The engine only builds
//! marker/model descriptors and hands them to a `SceneGraph` implementation:
//! the DOM-backed one on the web, `RecordingScene` everywhere else.

/// Marker and model descriptors with their attribute formatting.
pub mod descriptor;

/// `SceneGraph` trait and the in-memory recording implementation.
pub mod graph;

/// Idempotent A to Z marker registration.
pub mod registration;

pub use descriptor::{EntityTransform, MarkerDescriptor, MarkerSummary, RotationAnimation};
pub use graph::{RecordingScene, SceneGraph, SceneLog};
pub use registration::{RegistrationReport, register_all_markers};
