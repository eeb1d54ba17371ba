//! HTTP client for the order notification endpoint
//!
//! Each submission is a single JSON POST. The server turns it into an email
//! for the logistics team; only the status code matters here.

use super::traits::SubmissionClientTrait;
use crate::config::AppConfig;
use crate::error::SubmitError;
use crate::order::SubmissionPayload;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use std::time::Duration;
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Client for the send-email endpoint
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl SubmissionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Build a client from the resolved configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, SubmitError> {
        Self::new(config.endpoint.clone(), config.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionClientTrait for SubmissionClient {
    async fn submit_order(&self, payload: &SubmissionPayload) -> Result<(), SubmitError> {
        let request_id = Uuid::new_v4().to_string();
        tracing::info!(
            request_id = %request_id,
            endpoint = %self.endpoint,
            wz_numbers = payload.wz_numbers.len(),
            "sending transport order"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(REQUEST_ID_HEADER, request_id.as_str())
            .json(payload)
            .send()
            .await
            .inspect_err(|e| tracing::warn!(request_id = %request_id, error = %e, "request failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                request_id = %request_id,
                status = status.as_u16(),
                body = %body,
                "transport order rejected"
            );
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::debug!(
            request_id = %request_id,
            status = status.as_u16(),
            row = ?payload.storage_row(),
            "transport order accepted"
        );
        Ok(())
    }
}
