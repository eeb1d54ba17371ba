//! Application state definitions

use super::date_picker::{Clock, DatePicker};
use super::forms::{FocusTarget, InputMask, StepForm};
use crate::error::DraftError;
use crate::order::{
    FieldPath, FieldValue, Notification, OrderDraft, Priority, TransportType, WarehouseLocation,
    WizardController,
};
use std::collections::VecDeque;

/// Main application state
pub struct AppState {
    pub wizard: WizardController,
    pub form: StepForm,
    pub date_picker: DatePicker,
    /// Outcome of the last submission, shown until dismissed
    pub notification: Option<Notification>,
    /// One-line hint in the status bar
    pub status_message: Option<String>,
    errors: VecDeque<String>,
}

impl AppState {
    pub fn new(wizard: WizardController, clock: Clock) -> Self {
        let form = StepForm::for_step(&wizard);
        let mut date_picker = DatePicker::new(clock);
        date_picker.show(wizard.draft().delivery_date());
        Self {
            wizard,
            form,
            date_picker,
            notification: None,
            status_message: None,
            errors: VecDeque::new(),
        }
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "error queued");
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Rebuild the form after the wizard changed step or the draft changed shape
    pub fn sync_form(&mut self) {
        self.form.refresh(&self.wizard);
        self.date_picker.show(self.wizard.draft().delivery_date());
    }

    fn draft(&self) -> &OrderDraft {
        self.wizard.draft()
    }

    /// Current text of the focused target, if it takes text
    pub fn active_text(&self) -> Option<&str> {
        let target = self.form.active_target();
        if !target.accepts_text() {
            return None;
        }
        match target {
            FocusTarget::Field(path) => self.draft().text_field(path),
            FocusTarget::DocumentSlot(index) => {
                self.draft().document_numbers().get(index).map(String::as_str)
            }
            FocusTarget::Buttons => None,
        }
    }

    fn active_mask(&self) -> InputMask {
        match self.form.active_target() {
            FocusTarget::Field(path) => InputMask::for_path(path),
            FocusTarget::DocumentSlot(_) => InputMask::document_number(),
            FocusTarget::Buttons => InputMask::None,
        }
    }

    fn write_active_text(&mut self, value: String) -> Result<(), DraftError> {
        match self.form.active_target() {
            FocusTarget::Field(path) => self.wizard.set_field(path, value),
            FocusTarget::DocumentSlot(index) => self.wizard.set_document_number(index, &value),
            FocusTarget::Buttons => Ok(()),
        }
    }

    /// Type a character into the focused text target
    pub fn input_char(&mut self, c: char) -> Result<(), DraftError> {
        let Some(current) = self.active_text() else {
            return Ok(());
        };
        match self.active_mask().push_char(current, c) {
            Some(value) => self.write_active_text(value),
            None => Ok(()),
        }
    }

    pub fn backspace(&mut self) -> Result<(), DraftError> {
        let Some(current) = self.active_text() else {
            return Ok(());
        };
        let value = self.active_mask().pop_char(current);
        self.write_active_text(value)
    }

    /// Step the focused choice field through its options
    pub fn cycle_choice(&mut self, forward: bool) -> Result<(), DraftError> {
        let FocusTarget::Field(path) = self.form.active_target() else {
            return Ok(());
        };
        let value: FieldValue = match path {
            FieldPath::TransportType => {
                cycle(&TransportType::ALL, self.draft().transport_type(), forward).into()
            }
            FieldPath::WarehouseLocation => FieldValue::Warehouse(Some(cycle(
                &WarehouseLocation::ALL,
                self.draft().transport().warehouse(),
                forward,
            ))),
            FieldPath::Priority => {
                cycle(&Priority::ALL, Some(self.draft().priority()), forward).into()
            }
            _ => return Ok(()),
        };
        self.wizard.set_field(path, value)?;
        self.sync_form();
        Ok(())
    }

    pub fn toggle_flag(&mut self) -> Result<(), DraftError> {
        if self.form.active_target() != FocusTarget::Field(FieldPath::PartialDeliveryAllowed) {
            return Ok(());
        }
        let flag = !self.draft().partial_delivery_allowed();
        self.wizard.set_field(FieldPath::PartialDeliveryAllowed, flag)
    }

    /// Store the date under the calendar cursor; disabled days are refused
    pub fn pick_date(&mut self) -> Result<bool, DraftError> {
        match self.date_picker.select() {
            Some(date) => {
                self.wizard.set_field(FieldPath::DeliveryDate, date)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn add_document_slot(&mut self) {
        self.wizard.add_document_number_slot();
        self.sync_form();
        let last = self.draft().document_numbers().len() - 1;
        self.form.focus(FocusTarget::DocumentSlot(last));
    }

    pub fn remove_active_document_slot(&mut self) -> Result<(), DraftError> {
        if let FocusTarget::DocumentSlot(index) = self.form.active_target() {
            self.wizard.remove_document_number_slot(index)?;
            self.sync_form();
            let last = self.draft().document_numbers().len() - 1;
            self.form.focus(FocusTarget::DocumentSlot(index.min(last)));
        }
        Ok(())
    }
}

/// Next (or previous) option after `current`; an empty selection starts at the ends
fn cycle<T: Copy + PartialEq>(options: &[T], current: Option<T>, forward: bool) -> T {
    let len = options.len();
    let index = match current.and_then(|c| options.iter().position(|o| *o == c)) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    options[index]
}
