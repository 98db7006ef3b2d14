//! Screen output: the `UiSink` seam, its test doubles, the pure presenter
//! helpers and the DOM-backed sink used in the browser.

pub mod presenter;
pub mod sink;

#[cfg(target_arch = "wasm32")]
pub mod dom_ui;

pub use sink::{NullUi, RecordingUi, UiLog, UiSink};
