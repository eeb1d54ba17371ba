//! Wizard controller: owns the draft and the current step

use super::draft::{FieldPath, FieldValue, OrderDraft};
use super::payload::SubmissionPayload;
use super::steps::WizardStep;
use super::validation::StepGates;
use crate::error::{DraftError, NavigationError, SubmitError};
use crate::submission::SubmissionClientTrait;

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Transport order sent to the logistics team.";
pub const SUBMIT_FAILURE_MESSAGE: &str = "Sending the transport order failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

/// User-facing outcome of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success() -> Self {
        Self {
            kind: NotificationKind::Success,
            message: SUBMIT_SUCCESS_MESSAGE.to_string(),
        }
    }

    /// Generic failure; the cause is only logged
    pub fn failure() -> Self {
        Self {
            kind: NotificationKind::Failure,
            message: SUBMIT_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}

/// Linear six-step wizard over one [`OrderDraft`]
#[derive(Debug, Clone, Default)]
pub struct WizardController {
    draft: OrderDraft,
    current_step: WizardStep,
    gates: StepGates,
    in_flight: bool,
}

impl WizardController {
    pub fn new(gates: StepGates) -> Self {
        Self {
            draft: OrderDraft::new(),
            current_step: WizardStep::FIRST,
            gates,
            in_flight: false,
        }
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn gates(&self) -> &StepGates {
        &self.gates
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    /// Recomputed from the draft on every call
    pub fn is_current_step_valid(&self) -> bool {
        self.gates.is_step_valid(self.current_step, &self.draft)
    }

    /// Whether the "Next" control should be enabled
    pub fn can_advance(&self) -> bool {
        self.current_step != WizardStep::LAST && self.is_current_step_valid()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// Move forward if the current step's gate passes; otherwise nothing changes
    pub fn advance(&mut self) -> Result<WizardStep, NavigationError> {
        let next = self.current_step.next().ok_or(NavigationError::AtLastStep)?;
        if !self.is_current_step_valid() {
            return Err(NavigationError::StepIncomplete(self.current_step));
        }
        tracing::debug!(from = self.current_step.index(), to = next.index(), "advance");
        self.current_step = next;
        Ok(next)
    }

    /// Move back without re-validating anything
    pub fn retreat(&mut self) -> Result<WizardStep, NavigationError> {
        let prev = self
            .current_step
            .prev()
            .ok_or(NavigationError::AtFirstStep)?;
        tracing::debug!(from = self.current_step.index(), to = prev.index(), "retreat");
        self.current_step = prev;
        Ok(prev)
    }

    pub fn set_field(
        &mut self,
        path: FieldPath,
        value: impl Into<FieldValue>,
    ) -> Result<(), DraftError> {
        self.draft.set_field(path, value.into())
    }

    pub fn add_document_number_slot(&mut self) {
        self.draft.add_document_number_slot();
    }

    pub fn remove_document_number_slot(&mut self, index: usize) -> Result<(), DraftError> {
        self.draft.remove_document_number_slot(index)
    }

    pub fn set_document_number(&mut self, index: usize, value: &str) -> Result<(), DraftError> {
        self.draft.set_document_number(index, value)
    }

    /// Document numbers the payload will silently leave out
    pub fn malformed_document_numbers(&self) -> Vec<&str> {
        self.gates.malformed_document_numbers(&self.draft)
    }

    pub fn build_submission_payload(&self) -> Result<SubmissionPayload, SubmitError> {
        if self.current_step != WizardStep::LAST {
            return Err(SubmitError::NotAtSummary);
        }
        Ok(SubmissionPayload::from_draft(&self.draft, &self.gates))
    }

    /// Mark a submission as in flight and hand out its payload
    pub fn begin_submission(&mut self) -> Result<SubmissionPayload, SubmitError> {
        if self.in_flight {
            return Err(SubmitError::AlreadyInFlight);
        }
        let payload = self.build_submission_payload()?;
        self.in_flight = true;
        Ok(payload)
    }

    /// Settle the in-flight submission. A success starts a fresh draft; a
    /// failure keeps the current one so the user can retry.
    pub fn finish_submission(&mut self, outcome: Result<(), SubmitError>) -> Notification {
        self.in_flight = false;
        match outcome {
            Ok(()) => {
                tracing::info!("transport order accepted");
                self.draft = OrderDraft::new();
                self.current_step = WizardStep::FIRST;
                Notification::success()
            }
            Err(err) => {
                tracing::warn!(error = %err, "transport order submission failed");
                Notification::failure()
            }
        }
    }

    /// Build, send and settle in one call. The event loop splits this
    /// around a spawned task instead.
    #[allow(dead_code)]
    pub async fn submit(
        &mut self,
        client: &dyn SubmissionClientTrait,
    ) -> Result<Notification, SubmitError> {
        let payload = self.begin_submission()?;
        let outcome = client.submit_order(&payload).await;
        Ok(self.finish_submission(outcome))
    }
}
