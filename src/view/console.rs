//! Terminal rendition of the page, used by the binary.

use super::{FormView, StatusView};
use tracing::{error, info};

pub struct ConsoleView {
    submit_label: String,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self {
            submit_label: "Request observation".to_string(),
        }
    }
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusView for ConsoleView {
    fn set_name(&mut self, name: &str) {
        println!("== {} ==", name);
    }

    fn set_description_html(&mut self, html: &str) {
        println!("{}", html.trim_end());
    }

    fn set_timelapse_visible(&mut self, _visible: bool) {}

    fn set_no_timelapse_visible(&mut self, visible: bool) {
        if visible {
            println!("No timelapse available yet.");
        }
    }

    fn set_frame_count(&mut self, frames: u64) {
        println!("Timelapse frames: {}", frames);
    }

    fn set_last_updated(&mut self, text: &str) {
        println!("Last updated: {}", text);
    }

    fn show_image(&mut self, url: &str) {
        println!("Timelapse (image): {}", url);
    }

    fn show_video(&mut self, url: &str, mime: &str) {
        println!("Timelapse ({}): {}", mime, url);
    }

    fn show_error(&mut self, message: &str) {
        error!("{}", message);
    }

    fn hide_error(&mut self) {}
}

impl FormView for ConsoleView {
    fn hide_notifications(&mut self) {}

    fn set_inputs_enabled(&mut self, enabled: bool) {
        info!(enabled, "observation form inputs toggled");
    }

    fn submit_label(&self) -> String {
        self.submit_label.clone()
    }

    fn set_submit_label(&mut self, label: &str) {
        self.submit_label = label.to_string();
    }

    fn clear_email(&mut self) {}

    fn show_success(&mut self, message: &str) {
        println!("{}", message);
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {}", message);
    }
}
