use bevy::prelude::*;
use constants::dom::{
    CURRENT_LETTER_ID, ERROR_MESSAGE_ID, ERROR_OVERLAY_ID, GESTURE_HINT_CLASS, HIDDEN_CLASS,
    INSTRUCTIONS_ID, LOADING_OVERLAY_ID, LOADING_PROGRESS_ID, LOADING_STATUS_ID,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::presenter::progress_width;
use super::sink::UiSink;
use crate::error::ArError;

/// `UiSink` writing into the page's overlay elements.
///
/// Elements are looked up once; a missing id is reported at construction
/// and that output is dropped for the rest of the session.
pub struct DomUi {
    instructions: Option<Element>,
    current_letter: Option<Element>,
    loading_status: Option<Element>,
    loading_progress: Option<HtmlElement>,
    loading_overlay: Option<Element>,
    error_overlay: Option<Element>,
    error_message: Option<Element>,
    gesture_hint: Option<Element>,
}

impl DomUi {
    pub fn new() -> Result<Self, ArError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ArError::Dom("document not available".to_string()))?;

        let lookup = |id: &str| {
            let element = document.get_element_by_id(id);
            if element.is_none() {
                warn!("Element #{} not found, its output is disabled", id);
            }
            element
        };

        Ok(Self {
            instructions: lookup(INSTRUCTIONS_ID),
            current_letter: lookup(CURRENT_LETTER_ID),
            loading_status: lookup(LOADING_STATUS_ID),
            loading_progress: lookup(LOADING_PROGRESS_ID)
                .and_then(|e| e.dyn_into::<HtmlElement>().ok()),
            loading_overlay: lookup(LOADING_OVERLAY_ID),
            error_overlay: lookup(ERROR_OVERLAY_ID),
            error_message: lookup(ERROR_MESSAGE_ID),
            gesture_hint: gesture_hint_element(&document),
        })
    }
}

// Reuse the page's hint element or append one to <body>
fn gesture_hint_element(document: &Document) -> Option<Element> {
    let selector = format!(".{}", GESTURE_HINT_CLASS);
    if let Ok(Some(element)) = document.query_selector(&selector) {
        return Some(element);
    }

    let element = document.create_element("div").ok()?;
    element.set_class_name(&format!("{} {}", GESTURE_HINT_CLASS, HIDDEN_CLASS));
    document.body()?.append_child(&element).ok()?;
    Some(element)
}

fn set_text(element: &Option<Element>, text: &str) {
    if let Some(element) = element {
        element.set_text_content(Some(text));
    }
}

fn set_hidden(element: &Option<Element>, hidden: bool) {
    if let Some(element) = element {
        let classes = element.class_list();
        let result = if hidden {
            classes.add_1(HIDDEN_CLASS)
        } else {
            classes.remove_1(HIDDEN_CLASS)
        };
        if let Err(e) = result {
            warn!("Failed to toggle visibility of #{}: {:?}", element.id(), e);
        }
    }
}

impl UiSink for DomUi {
    fn set_status_text(&mut self, text: &str) {
        set_text(&self.instructions, text);
    }

    fn set_loading_status(&mut self, text: &str) {
        set_text(&self.loading_status, text);
    }

    fn set_progress(&mut self, percent: u8) {
        if let Some(bar) = &self.loading_progress {
            if let Err(e) = bar.style().set_property("width", &progress_width(percent)) {
                warn!("Failed to update progress bar: {:?}", e);
            }
        }
    }

    fn set_detected_letter(&mut self, label: &str) {
        set_text(&self.current_letter, label);
    }

    fn show_error(&mut self, message: &str) {
        set_text(&self.error_message, message);
        set_hidden(&self.error_overlay, false);
        set_hidden(&self.loading_overlay, true);
    }

    fn show_gesture_hint(&mut self, text: &str) {
        set_text(&self.gesture_hint, text);
        set_hidden(&self.gesture_hint, false);
    }

    fn hide_gesture_hint(&mut self) {
        set_hidden(&self.gesture_hint, true);
    }

    fn hide_loading_overlay(&mut self) {
        set_hidden(&self.loading_overlay, true);
    }
}
