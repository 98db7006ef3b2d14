use bevy::prelude::*;

/// Host lifecycle, separate from the session's loading phase.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum HostState {
    /// Waiting for the configuration asset.
    #[default]
    LoadingConfig,
    /// Session started; host events are dispatched every frame.
    Running,
}
