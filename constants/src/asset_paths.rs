/// Base directory for trained `.patt` marker files.
pub const MARKERS_PATH: &str = "assets/markers/";

/// Base directory for per-letter glTF models.
pub const MODELS_PATH: &str = "assets/3dmodels/";

/// Base directory for per-letter pronunciation cues.
pub const AUDIO_PATH: &str = "assets/audio/";

/// Prefix of every marker file name, e.g. `pattern-A.patt`.
pub const MARKER_FILE_PREFIX: &str = "pattern-";

pub const MARKER_EXTENSION: &str = ".patt";
pub const AUDIO_EXTENSION: &str = ".mp3";

/// Engine configuration file, relative to the asset root.
pub const CONFIG_PATH: &str = "config/flashcards.json";
