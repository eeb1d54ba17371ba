//! Wizard steps and the fields each one edits

use super::draft::{FieldPath, OrderDraft};
use super::validation::StepGates;

/// One of the six wizard steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WizardStep {
    #[default]
    Transport,
    DocumentNumbers,
    DeliveryDate,
    DeliveryDetails,
    Requester,
    Summary,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        Self::Transport,
        Self::DocumentNumbers,
        Self::DeliveryDate,
        Self::DeliveryDetails,
        Self::Requester,
        Self::Summary,
    ];

    pub const FIRST: WizardStep = Self::Transport;
    pub const LAST: WizardStep = Self::Summary;

    /// 1-based position
    pub fn index(&self) -> usize {
        match self {
            Self::Transport => 1,
            Self::DocumentNumbers => 2,
            Self::DeliveryDate => 3,
            Self::DeliveryDetails => 4,
            Self::Requester => 5,
            Self::Summary => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        index
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(&self) -> Option<Self> {
        Self::from_index(self.index() - 1)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Transport => "Transport type",
            Self::DocumentNumbers => "WZ numbers",
            Self::DeliveryDate => "Delivery date",
            Self::DeliveryDetails => "Delivery details",
            Self::Requester => "Requester",
            Self::Summary => "Summary",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Transport => "Choose how the order is transported.",
            Self::DocumentNumbers => "Enter the WZ numbers for this order.",
            Self::DeliveryDate => "Pick the delivery date and preferred hours.",
            Self::DeliveryDetails => "Enter the delivery address and contact.",
            Self::Requester => "Who is ordering the transport?",
            Self::Summary => "Check the order before sending it.",
        }
    }

    pub fn definition(&self) -> &'static StepDefinition {
        &STEP_DEFINITIONS[self.index() - 1]
    }
}

/// Gate predicate for the forward edge out of a step
pub type StepGate = fn(&StepGates, &OrderDraft) -> bool;

/// Fields a step edits and the gate that must pass to leave it
pub struct StepDefinition {
    pub step: WizardStep,
    pub fields: &'static [FieldPath],
    pub gate: StepGate,
}

pub static STEP_DEFINITIONS: [StepDefinition; 6] = [
    StepDefinition {
        step: WizardStep::Transport,
        fields: &[
            FieldPath::TransportType,
            FieldPath::WarehouseLocation,
            FieldPath::LoadingLocation,
            FieldPath::UnloadingLocation,
        ],
        gate: StepGates::transport_valid,
    },
    // Document numbers are edited through the slot operations
    StepDefinition {
        step: WizardStep::DocumentNumbers,
        fields: &[],
        gate: StepGates::document_numbers_valid,
    },
    StepDefinition {
        step: WizardStep::DeliveryDate,
        fields: &[FieldPath::DeliveryDate, FieldPath::PreferredDeliveryWindow],
        gate: StepGates::delivery_date_valid,
    },
    StepDefinition {
        step: WizardStep::DeliveryDetails,
        fields: &[
            FieldPath::DeliveryCity,
            FieldPath::DeliveryPostalCode,
            FieldPath::DeliveryStreet,
            FieldPath::DeliveryBuildingNumber,
            FieldPath::DeliveryContactPerson,
            FieldPath::DeliveryPhoneNumber,
            FieldPath::DeliveryAdditionalInfo,
            FieldPath::Priority,
            FieldPath::PartialDeliveryAllowed,
            FieldPath::EstimatedWeight,
            FieldPath::EstimatedLength,
            FieldPath::EstimatedDimensions,
        ],
        gate: StepGates::delivery_details_valid,
    },
    StepDefinition {
        step: WizardStep::Requester,
        fields: &[
            FieldPath::RequesterName,
            FieldPath::RequesterEmail,
            FieldPath::RequesterDepartment,
            FieldPath::SpecialRequirements,
        ],
        gate: StepGates::requester_valid,
    },
    StepDefinition {
        step: WizardStep::Summary,
        fields: &[],
        gate: StepGates::summary_valid,
    },
];
