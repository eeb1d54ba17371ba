//! Outbound order payload
//!
//! The payload is the JSON document POSTed to the order endpoint. Field names
//! follow what the back office adapter reads (`wzNumbers`, `fullAddress`, ...).

use super::draft::{DeliveryDetails, OrderDraft, Priority, Requester, TransportSelection};
use super::validation::StepGates;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used in the payload and the summary (Polish `dd.MM.yyyy`)
pub const PAYLOAD_DATE_FORMAT: &str = "%d.%m.%Y";

/// Date format of the back office's storage column
pub const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadDeliveryDetails {
    #[serde(flatten)]
    pub details: DeliveryDetails,
    pub full_address: String,
}

/// Finalized order, built once the summary step is reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub transport_type: Option<String>,
    pub warehouse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unloading_location: Option<String>,
    pub wz_numbers: Vec<String>,
    pub delivery_date: Option<String>,
    pub delivery_details: PayloadDeliveryDetails,
    pub requester: Requester,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_delivery_time: Option<String>,
    pub partial_delivery: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requirements: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl SubmissionPayload {
    /// Derive the payload from `draft`. Malformed document numbers are dropped.
    pub fn from_draft(draft: &OrderDraft, gates: &StepGates) -> Self {
        let (loading_location, unloading_location) = match draft.transport() {
            TransportSelection::Producer {
                loading_location,
                unloading_location,
            } => (
                Some(loading_location.clone()),
                Some(unloading_location.clone()),
            ),
            _ => (None, None),
        };

        let details = draft.delivery_details().clone();
        let full_address = details.full_address();

        Self {
            transport_type: draft.transport_type().map(|t| t.label().to_string()),
            warehouse: draft.transport().warehouse().map(|w| w.label().to_string()),
            loading_location,
            unloading_location,
            wz_numbers: draft
                .document_numbers()
                .iter()
                .filter(|n| gates.document_format.is_valid(n))
                .cloned()
                .collect(),
            delivery_date: draft
                .delivery_date()
                .map(|d| d.format(PAYLOAD_DATE_FORMAT).to_string()),
            delivery_details: PayloadDeliveryDetails {
                details,
                full_address,
            },
            requester: draft.requester().clone(),
            priority: draft.priority(),
            preferred_delivery_time: gates
                .variant
                .collects_delivery_window()
                .then(|| draft.preferred_delivery_window().to_string()),
            partial_delivery: draft.partial_delivery_allowed(),
            estimated_weight: non_empty(draft.estimated_weight()),
            estimated_length: non_empty(draft.estimated_length()),
            estimated_dimensions: non_empty(draft.estimated_dimensions()),
            special_requirements: non_empty(draft.special_requirements()),
        }
    }

    /// Row the back office appends to its order table
    pub fn storage_row(&self) -> StorageRow {
        let d = &self.delivery_details;
        StorageRow {
            transport_type: self.transport_type.clone().unwrap_or_default(),
            wz_numbers: self.wz_numbers.join(", "),
            delivery_date: self
                .delivery_date
                .as_deref()
                .and_then(|s| NaiveDate::parse_from_str(s, PAYLOAD_DATE_FORMAT).ok())
                .map(|date| date.format(STORAGE_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            full_address: d.full_address.clone(),
            contact_person: d.details.contact_person.clone(),
            phone_number: d.details.phone_number.clone(),
            additional_info: d.details.additional_info.clone(),
        }
    }

    /// Label/value pairs for the summary step, in display order
    pub fn summary_lines(&self) -> Vec<(&'static str, String)> {
        let or_unset = |v: &Option<String>| v.clone().unwrap_or_else(|| "Not specified".into());
        let d = &self.delivery_details.details;

        let mut lines = vec![("Transport type", or_unset(&self.transport_type))];
        if let Some(warehouse) = &self.warehouse {
            lines.push(("Warehouse", warehouse.clone()));
        }
        if let Some(loading) = &self.loading_location {
            lines.push(("Loading location", loading.clone()));
        }
        if let Some(unloading) = &self.unloading_location {
            lines.push(("Unloading location", unloading.clone()));
        }
        lines.push(("WZ numbers", self.wz_numbers.join(", ")));
        lines.push((
            "Delivery date",
            self.delivery_date
                .clone()
                .unwrap_or_else(|| "Not selected".into()),
        ));
        if self.preferred_delivery_time.is_some() {
            lines.push(("Preferred hours", or_unset(&self.preferred_delivery_time)));
        }
        lines.push(("Delivery address", self.delivery_details.full_address.clone()));
        lines.push(("Contact person", d.contact_person.clone()));
        lines.push(("Phone number", d.phone_number.clone()));
        lines.push((
            "Requester",
            format!(
                "{} <{}>, {}",
                self.requester.name, self.requester.email, self.requester.department
            ),
        ));
        lines.push(("Priority", self.priority.label().to_string()));
        lines.push((
            "Partial delivery",
            if self.partial_delivery { "Yes" } else { "No" }.to_string(),
        ));
        lines.push(("Estimated weight", or_unset(&self.estimated_weight)));
        lines.push(("Estimated length", or_unset(&self.estimated_length)));
        if let Some(dimensions) = &self.estimated_dimensions {
            lines.push(("Estimated dimensions", dimensions.clone()));
        }
        if let Some(requirements) = &self.special_requirements {
            lines.push(("Special requirements", requirements.clone()));
        }
        if !d.additional_info.is_empty() {
            lines.push(("Additional information", d.additional_info.clone()));
        }
        lines
    }
}

/// Column set of the back office's order table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageRow {
    pub transport_type: String,
    pub wz_numbers: String,
    pub delivery_date: String,
    pub full_address: String,
    pub contact_person: String,
    pub phone_number: String,
    pub additional_info: String,
}
