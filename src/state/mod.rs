//! Application state module

mod app_state;
mod date_picker;
mod forms;

pub use app_state::*;
#[cfg(test)]
pub use date_picker::fixed_clock;
pub use date_picker::{local_clock, Clock, DatePicker};
pub use forms::*;
