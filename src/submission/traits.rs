//! Trait abstraction for the submission endpoint to enable mocking in tests

use crate::error::SubmitError;
use crate::order::SubmissionPayload;
use async_trait::async_trait;

/// Delivers a finished order to the logistics team
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionClientTrait: Send + Sync {
    /// POST the payload once; any non-2xx answer is a failure
    async fn submit_order(&self, payload: &SubmissionPayload) -> Result<(), SubmitError>;
}
