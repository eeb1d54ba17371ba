//! Focus handling for the wizard step forms

use crate::order::{FieldKind, FieldPath, WizardController, WizardStep};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Something on a step form that can hold focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Field(FieldPath),
    DocumentSlot(usize),
    Buttons,
}

impl FocusTarget {
    /// Whether typed characters go into this target
    pub fn accepts_text(&self) -> bool {
        match self {
            Self::Field(path) => matches!(path.kind(), FieldKind::Text | FieldKind::Multiline),
            Self::DocumentSlot(_) => true,
            Self::Buttons => false,
        }
    }
}

/// Buttons on the bottom row of every step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepButton {
    Back,
    /// "Next", or "Submit" on the summary step
    #[default]
    Forward,
}

/// Focus state of the current step's form
#[derive(Debug, Clone)]
pub struct StepForm {
    step: WizardStep,
    targets: Vec<FocusTarget>,
    pub active_field_index: usize,
    pub selected_button: StepButton,
}

impl StepForm {
    /// Lay out the focus targets for the controller's current step
    pub fn for_step(wizard: &WizardController) -> Self {
        let mut form = Self {
            step: wizard.current_step(),
            targets: Vec::new(),
            active_field_index: 0,
            selected_button: StepButton::default(),
        };
        form.targets = Self::targets_for(wizard);
        form
    }

    fn targets_for(wizard: &WizardController) -> Vec<FocusTarget> {
        let step = wizard.current_step();
        let draft = wizard.draft();
        let collects_window = wizard.gates().variant.collects_delivery_window();

        let mut targets: Vec<FocusTarget> = match step {
            WizardStep::DocumentNumbers => (0..draft.document_numbers().len())
                .map(FocusTarget::DocumentSlot)
                .collect(),
            _ => step
                .definition()
                .fields
                .iter()
                .copied()
                .filter(|path| draft.is_field_active(*path))
                .filter(|path| *path != FieldPath::PreferredDeliveryWindow || collects_window)
                .map(FocusTarget::Field)
                .collect(),
        };
        targets.push(FocusTarget::Buttons);
        targets
    }

    /// Re-derive targets after the draft changed shape, keeping focus in range.
    /// A step change resets focus to the top of the new form.
    pub fn refresh(&mut self, wizard: &WizardController) {
        if self.step != wizard.current_step() {
            *self = Self::for_step(wizard);
            return;
        }
        self.targets = Self::targets_for(wizard);
        self.active_field_index = self.active_field_index.min(self.targets.len() - 1);
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn targets(&self) -> &[FocusTarget] {
        &self.targets
    }

    pub fn active_target(&self) -> FocusTarget {
        self.targets
            .get(self.active_field_index)
            .copied()
            .unwrap_or(FocusTarget::Buttons)
    }

    /// Move focus to a target if it is on this form
    pub fn focus(&mut self, target: FocusTarget) {
        if let Some(index) = self.targets.iter().position(|t| *t == target) {
            self.active_field_index = index;
        }
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.active_target() == FocusTarget::Buttons
    }

    pub fn toggle_button(&mut self) {
        self.selected_button = match self.selected_button {
            StepButton::Back => StepButton::Forward,
            StepButton::Forward => StepButton::Back,
        };
    }
}

impl Form for StepForm {
    fn field_count(&self) -> usize {
        self.targets.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.targets.len().saturating_sub(1));
    }
}
