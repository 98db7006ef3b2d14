/// Session toggles reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    ToggleAudio,
    ToggleGestures,
}

impl InputAction {
    /// Maps a `KeyboardEvent.key` value to an action.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "a" | "A" => Some(Self::ToggleAudio),
            "g" | "G" => Some(Self::ToggleGestures),
            _ => None,
        }
    }
}
