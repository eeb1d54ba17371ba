//! Form domain layer
//!
//! Focus handling and input masks for the wizard step forms.

mod field;
mod form_state;

pub use field::InputMask;
pub use form_state::{FocusTarget, Form, StepForm, StepButton};
