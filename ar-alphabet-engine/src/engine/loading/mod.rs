//! Startup loading: configuration resolution, loading phases and the
//! progress bar arithmetic.

/// JSON configuration loading and fallback to defaults.
///
/// Moves the host into `Running` once a configuration is available.
pub mod config_loader;

/// Forward-only loading phase enum.
pub mod phase;

/// Progress milestones and per-model bookkeeping.
pub mod progress;

pub use phase::LoadingPhase;
pub use progress::LoadingProgress;
