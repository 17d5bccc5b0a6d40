//! In-memory view ports, for headless embedding and tests.

use super::{FormView, StatusView};

/// Media element currently shown in the timelapse area
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Media {
    #[default]
    None,
    Image {
        url: String,
    },
    Video {
        url: String,
        mime: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStatusView {
    pub name: String,
    pub description_html: String,
    pub timelapse_visible: bool,
    pub no_timelapse_visible: bool,
    pub frame_count: Option<u64>,
    pub last_updated: String,
    pub media: Media,
    pub error: Option<String>,
}

impl StatusView for MemoryStatusView {
    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn set_description_html(&mut self, html: &str) {
        self.description_html = html.to_string();
    }

    fn set_timelapse_visible(&mut self, visible: bool) {
        self.timelapse_visible = visible;
    }

    fn set_no_timelapse_visible(&mut self, visible: bool) {
        self.no_timelapse_visible = visible;
    }

    fn set_frame_count(&mut self, frames: u64) {
        self.frame_count = Some(frames);
    }

    fn set_last_updated(&mut self, text: &str) {
        self.last_updated = text.to_string();
    }

    fn show_image(&mut self, url: &str) {
        self.media = Media::Image {
            url: url.to_string(),
        };
    }

    fn show_video(&mut self, url: &str, mime: &str) {
        self.media = Media::Video {
            url: url.to_string(),
            mime: mime.to_string(),
        };
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn hide_error(&mut self) {
        self.error = None;
    }
}

/// Form state plus a log of enable/disable transitions
#[derive(Debug, Clone)]
pub struct MemoryFormView {
    pub email: String,
    pub inputs_enabled: bool,
    pub submit_label: String,
    pub success: Option<String>,
    pub error: Option<String>,
    /// Every value passed to `set_inputs_enabled`, in order
    pub enabled_history: Vec<bool>,
    /// Every label passed to `set_submit_label`, in order
    pub label_history: Vec<String>,
}

impl MemoryFormView {
    pub fn new(email: impl Into<String>, submit_label: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            inputs_enabled: true,
            submit_label: submit_label.into(),
            success: None,
            error: None,
            enabled_history: Vec::new(),
            label_history: Vec::new(),
        }
    }
}

impl FormView for MemoryFormView {
    fn hide_notifications(&mut self) {
        self.success = None;
        self.error = None;
    }

    fn set_inputs_enabled(&mut self, enabled: bool) {
        self.inputs_enabled = enabled;
        self.enabled_history.push(enabled);
    }

    fn submit_label(&self) -> String {
        self.submit_label.clone()
    }

    fn set_submit_label(&mut self, label: &str) {
        self.submit_label = label.to_string();
        self.label_history.push(label.to_string());
    }

    fn clear_email(&mut self) {
        self.email.clear();
    }

    fn show_success(&mut self, message: &str) {
        self.success = Some(message.to_string());
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }
}
