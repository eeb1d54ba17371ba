//! Step form rendering

mod calendar;
mod field_renderer;
mod step_form;
mod summary;

pub use step_form::draw_step;
