//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use components::{render_error_dialog, render_notification_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, body_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);
    forms::draw_step(frame, body_area, &app.state);
    layout::draw_status_bar(frame, status_area, app);

    // Overlays: errors before notifications
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error);
    } else if let Some(notification) = &app.state.notification {
        render_notification_dialog(frame, notification);
    }
}
