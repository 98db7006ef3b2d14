use serde::Serialize;

/// Startup sequence from the camera request to the first rendered frame.
///
/// Phases only move forward. `Failed` absorbs every later transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "reason", rename_all = "snake_case")]
pub enum LoadingPhase {
    #[default]
    AwaitingCamera,
    CameraGranted,
    SceneLoaded,
    MarkersRegistered,
    AssetsLoading,
    Ready,
    Failed(String),
}

impl LoadingPhase {
    pub fn rank(&self) -> u8 {
        match self {
            Self::AwaitingCamera => 0,
            Self::CameraGranted => 1,
            Self::SceneLoaded => 2,
            Self::MarkersRegistered => 3,
            Self::AssetsLoading => 4,
            Self::Ready => 5,
            Self::Failed(_) => 6,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// True once the marker entities exist in the scene.
    pub fn markers_registered(&self) -> bool {
        (Self::MarkersRegistered.rank()..=Self::Ready.rank()).contains(&self.rank())
    }

    pub fn can_advance_to(&self, next: &LoadingPhase) -> bool {
        !self.is_failed() && next.rank() >= self.rank()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AwaitingCamera => "awaiting_camera",
            Self::CameraGranted => "camera_granted",
            Self::SceneLoaded => "scene_loaded",
            Self::MarkersRegistered => "markers_registered",
            Self::AssetsLoading => "assets_loading",
            Self::Ready => "ready",
            Self::Failed(_) => "failed",
        }
    }
}
