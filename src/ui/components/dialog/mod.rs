//! Dialog components for TUI

mod base;
mod error_dialog;
mod notification_dialog;

pub use error_dialog::render_error_dialog;
pub use notification_dialog::render_notification_dialog;
