use std::cell::RefCell;
use std::rc::Rc;

/// Everything the engine can change on screen.
pub trait UiSink {
    /// Instruction line shown over the camera feed.
    fn set_status_text(&mut self, text: &str);

    /// Text under the loading bar.
    fn set_loading_status(&mut self, text: &str);

    /// Loading bar fill, 0 to 100.
    fn set_progress(&mut self, percent: u8);

    fn set_detected_letter(&mut self, label: &str);

    /// Shows the full-screen error overlay.
    fn show_error(&mut self, message: &str);

    fn show_gesture_hint(&mut self, text: &str);

    fn hide_gesture_hint(&mut self);

    fn hide_loading_overlay(&mut self);
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullUi;

impl UiSink for NullUi {
    fn set_status_text(&mut self, _text: &str) {}
    fn set_loading_status(&mut self, _text: &str) {}
    fn set_progress(&mut self, _percent: u8) {}
    fn set_detected_letter(&mut self, _label: &str) {}
    fn show_error(&mut self, _message: &str) {}
    fn show_gesture_hint(&mut self, _text: &str) {}
    fn hide_gesture_hint(&mut self) {}
    fn hide_loading_overlay(&mut self) {}
}

/// Current on-screen state as seen by a `RecordingUi`.
#[derive(Debug, Clone)]
pub struct UiLog {
    pub status_text: String,
    pub loading_status: String,
    pub progress: u8,
    pub progress_history: Vec<u8>,
    pub detected_letter: String,
    pub error: Option<String>,
    pub gesture_hint: Option<String>,
    pub loading_overlay_visible: bool,
}

impl Default for UiLog {
    fn default() -> Self {
        Self {
            status_text: String::new(),
            loading_status: String::new(),
            progress: 0,
            progress_history: Vec::new(),
            detected_letter: String::new(),
            error: None,
            gesture_hint: None,
            loading_overlay_visible: true,
        }
    }
}

/// Sink that remembers what it was told, for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct RecordingUi {
    log: Rc<RefCell<UiLog>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> std::cell::Ref<'_, UiLog> {
        self.log.borrow()
    }
}

impl UiSink for RecordingUi {
    fn set_status_text(&mut self, text: &str) {
        self.log.borrow_mut().status_text = text.to_string();
    }

    fn set_loading_status(&mut self, text: &str) {
        self.log.borrow_mut().loading_status = text.to_string();
    }

    fn set_progress(&mut self, percent: u8) {
        let mut log = self.log.borrow_mut();
        log.progress = percent;
        log.progress_history.push(percent);
    }

    fn set_detected_letter(&mut self, label: &str) {
        self.log.borrow_mut().detected_letter = label.to_string();
    }

    fn show_error(&mut self, message: &str) {
        self.log.borrow_mut().error = Some(message.to_string());
    }

    fn show_gesture_hint(&mut self, text: &str) {
        self.log.borrow_mut().gesture_hint = Some(text.to_string());
    }

    fn hide_gesture_hint(&mut self) {
        self.log.borrow_mut().gesture_hint = None;
    }

    fn hide_loading_overlay(&mut self) {
        self.log.borrow_mut().loading_overlay_visible = false;
    }
}
