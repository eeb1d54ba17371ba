//! Typed errors for the order wizard

use crate::order::{FieldPath, WizardStep};
use thiserror::Error;

/// Rejected structural update to the draft
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("unknown field path `{0}`")]
    UnknownPath(String),

    #[error("field `{path}` expects a {expected} value")]
    TypeMismatch {
        path: FieldPath,
        expected: &'static str,
    },

    #[error("field `{0}` is not part of the selected transport type")]
    InactiveField(FieldPath),

    #[error("document number slot {index} does not exist (have {len})")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("unknown option `{value}` for `{path}`")]
    UnknownOption { path: FieldPath, value: String },
}

/// Rejected step transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("step {} is incomplete", .0.index())]
    StepIncomplete(WizardStep),

    #[error("already at the summary step")]
    AtLastStep,

    #[error("already at the first step")]
    AtFirstStep,
}

/// Failure to build or dispatch the order
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("the summary step has not been reached")]
    NotAtSummary,

    #[error("a submission is already in progress")]
    AlreadyInFlight,

    #[error("order endpoint answered with status {status}")]
    Rejected { status: u16 },

    #[error("order endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("submission task ended unexpectedly")]
    Interrupted,
}
