//! Keyboard bindings for the audio and gesture toggles.

pub mod keyboard;

pub use keyboard::InputAction;
