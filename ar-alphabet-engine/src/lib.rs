//! Augmented-reality alphabet flashcards.
//!
//! A headless Bevy app that sits next to an A-Frame/AR.js page: it registers
//! one pattern marker and letter model per letter, follows the framework's
//! lifecycle events through the loading sequence and keeps the overlay UI
//! in step with what the camera currently sees.

pub mod engine;
pub mod error;
pub mod input;
pub mod rpc;
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use engine::core::app_setup::{ArAlphabetPlugin, create_app};
pub use error::ArError;
