//! Letter identities, configuration and the per-letter asset table.

/// Engine configuration with path derivation helpers.
pub mod config;

/// `Letter` identifier for A-Z.
pub mod letter;

/// Placeholder marker grids for printing test cards.
pub mod marker_pattern;

/// Letter-to-asset registry built from configuration.
pub mod registry;

pub use config::{ArConfig, ModelFormat};
pub use letter::Letter;
pub use registry::{AssetRegistry, LetterAsset};
