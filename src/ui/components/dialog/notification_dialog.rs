//! Submission outcome dialog

use super::base::{dismiss_hint, render_dialog, DialogConfig};
use crate::order::Notification;
use ratatui::{style::Color, Frame};

pub fn render_notification_dialog(frame: &mut Frame, notification: &Notification) {
    let (title, accent) = if notification.is_success() {
        ("Order sent", Color::Green)
    } else {
        ("Order not sent", Color::Red)
    };
    render_dialog(
        frame,
        DialogConfig {
            title,
            accent,
            message: &notification.message,
            hint: Some(dismiss_hint()),
            ..DialogConfig::default()
        },
    );
}
