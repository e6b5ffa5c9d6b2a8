//! UI Model
//!
//! This sub-model contains all state related to the user interface:
//! active tab, focused field, toast and lifecycle flags.

use std::time::Instant;

use crate::logic::field_sync::Field;
use crate::Tab;

#[derive(Clone, Debug)]
pub struct UiModel {
    /// Tab currently shown
    pub active_tab: Tab,

    /// Field receiving keystrokes on the active tab
    pub focused_field: Field,

    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,

    /// Config file in use, if any (shown in the legend)
    pub config_path: Option<String>,

    /// Set to exit the main loop
    pub should_quit: bool,
}

impl UiModel {
    pub fn new(active_tab: Tab) -> Self {
        Self {
            active_tab,
            focused_field: Field::A,
            toast_message: None,
            config_path: None,
            should_quit: false,
        }
    }

    /// Switch tabs; focus returns to the first field
    pub fn select_tab(&mut self, tab: Tab) {
        if self.active_tab != tab {
            self.active_tab = tab;
            self.focused_field = Field::A;
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focused_field = self.focused_field.other();
    }

    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some((message, Instant::now()));
    }

    /// Check if toast has been up long enough
    pub fn should_dismiss_toast(&self) -> bool {
        if let Some((_, timestamp)) = &self.toast_message {
            crate::logic::ui::should_dismiss_toast(timestamp.elapsed().as_millis())
        } else {
            false
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }
}
