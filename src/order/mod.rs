//! Transport order domain: draft, validation, steps and submission payload

mod controller;
mod draft;
mod payload;
mod steps;
mod validation;

pub use controller::{Notification, NotificationKind, WizardController};
pub use draft::{
    FieldKind, FieldPath, FieldValue, OrderDraft, Priority, TransportType, WarehouseLocation,
};
pub use payload::{SubmissionPayload, PAYLOAD_DATE_FORMAT};
pub use steps::WizardStep;
pub use validation::{
    is_selectable_delivery_date, phone_digit_count, DocumentNumberFormat, FormVariant, StepGates,
    DEFAULT_DOCUMENT_YEAR_SUFFIX, PHONE_DIGITS,
};
