//! View ports: the parts of the host page the widget reads and writes.
//!
//! The page owns the elements; the widget only talks to them through these
//! traits, which are handed to the services at construction time.

mod console;
mod memory;

pub use console::ConsoleView;
pub use memory::{MemoryFormView, MemoryStatusView, Media};

use crate::domain::{MediaKind, RenderPlan, TimelapseSection};
use crate::errors::ViewResult;

/// Target name, description and timelapse areas
pub trait StatusView {
    fn set_name(&mut self, name: &str);
    fn set_description_html(&mut self, html: &str);
    fn set_timelapse_visible(&mut self, visible: bool);
    fn set_no_timelapse_visible(&mut self, visible: bool);
    fn set_frame_count(&mut self, frames: u64);
    fn set_last_updated(&mut self, text: &str);
    /// Show the still-image element with `url`, hiding the video element
    fn show_image(&mut self, url: &str);
    /// Show the video element with `url` and `mime`, hiding the image element
    fn show_video(&mut self, url: &str, mime: &str);
    /// Inline error shown when the status could not be loaded or rendered
    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);
}

/// Observation request form and its notification areas
pub trait FormView {
    fn hide_notifications(&mut self);
    /// Enable or disable the email input and the submit control together
    fn set_inputs_enabled(&mut self, enabled: bool);
    fn submit_label(&self) -> String;
    fn set_submit_label(&mut self, label: &str);
    fn clear_email(&mut self);
    fn show_success(&mut self, message: &str);
    fn show_error(&mut self, message: &str);
}

/// Apply a refresh result to the page.
///
/// A failed refresh leaves the previous content alone and shows the error
/// inline instead.
pub fn render_status<V: StatusView + ?Sized>(result: &ViewResult<RenderPlan>, view: &mut V) {
    let plan = match result {
        Ok(plan) => plan,
        Err(e) => {
            view.show_error(&e.user_message());
            return;
        }
    };

    view.hide_error();
    view.set_name(&plan.name);
    view.set_description_html(&plan.description_html);

    let section = &plan.timelapse;
    if let TimelapseSection::Shown(tl) = section {
        view.set_frame_count(tl.frames);
        view.set_last_updated(&tl.last_updated);
        match tl.media {
            MediaKind::Image => view.show_image(&tl.url),
            MediaKind::Video { mime } => view.show_video(&tl.url, mime),
        }
    }
    view.set_timelapse_visible(section.timelapse_visible());
    view.set_no_timelapse_visible(section.no_timelapse_visible());
}
