//! Order draft aggregate and its typed field paths

use crate::error::DraftError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the goods reach the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    Producer,
    Warehouse,
}

impl TransportType {
    pub const ALL: [TransportType; 2] = [Self::Producer, Self::Warehouse];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Producer => "producer",
            Self::Warehouse => "warehouse",
        }
    }

    /// Display label sent to the back office
    pub fn label(&self) -> &'static str {
        match self {
            Self::Producer => "Transport od producenta",
            Self::Warehouse => "Magazyn własny",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

/// Company warehouses that can dispatch an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarehouseLocation {
    Lublin,
    Krakow,
    Poznan,
    Katowice,
    Gdynia,
    Wroclaw,
}

impl WarehouseLocation {
    pub const ALL: [WarehouseLocation; 6] = [
        Self::Lublin,
        Self::Krakow,
        Self::Poznan,
        Self::Katowice,
        Self::Gdynia,
        Self::Wroclaw,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Lublin => "lublin",
            Self::Krakow => "krakow",
            Self::Poznan => "poznan",
            Self::Katowice => "katowice",
            Self::Gdynia => "gdynia",
            Self::Wroclaw => "wroclaw",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Lublin => "Magazyn Lublin",
            Self::Krakow => "Magazyn Kraków",
            Self::Poznan => "Magazyn Poznań",
            Self::Katowice => "Magazyn Katowice",
            Self::Gdynia => "Magazyn Gdynia",
            Self::Wroclaw => "Magazyn Wrocław",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.code() == code)
    }
}

/// Order priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Self::Low, Self::Normal, Self::High];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::High => "High",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }
}

/// Transport type together with the field group only that type collects
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransportSelection {
    #[default]
    Unselected,
    Producer {
        loading_location: String,
        unloading_location: String,
    },
    Warehouse {
        warehouse: Option<WarehouseLocation>,
    },
}

impl TransportSelection {
    pub fn transport_type(&self) -> Option<TransportType> {
        match self {
            Self::Unselected => None,
            Self::Producer { .. } => Some(TransportType::Producer),
            Self::Warehouse { .. } => Some(TransportType::Warehouse),
        }
    }

    /// Switch to `transport_type`; re-selecting the current type keeps its fields
    pub fn select(&mut self, transport_type: TransportType) {
        if self.transport_type() == Some(transport_type) {
            return;
        }
        *self = match transport_type {
            TransportType::Producer => Self::Producer {
                loading_location: String::new(),
                unloading_location: String::new(),
            },
            TransportType::Warehouse => Self::Warehouse { warehouse: None },
        };
    }

    pub fn warehouse(&self) -> Option<WarehouseLocation> {
        match self {
            Self::Warehouse { warehouse } => *warehouse,
            _ => None,
        }
    }
}

/// Where and to whom the goods are delivered
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    pub city: String,
    pub postal_code: String,
    pub street: String,
    pub building_number: String,
    pub contact_person: String,
    pub phone_number: String,
    pub additional_info: String,
}

impl DeliveryDetails {
    /// Single-line address in the back office's format
    pub fn full_address(&self) -> String {
        format!(
            "{} {}, {} {}",
            self.street, self.building_number, self.postal_code, self.city
        )
    }
}

/// Person ordering the transport
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Requester {
    pub name: String,
    pub email: String,
    pub department: String,
}

/// WZ document numbers; always holds at least one (possibly empty) slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentNumbers(Vec<String>);

impl Default for DocumentNumbers {
    fn default() -> Self {
        Self(vec![String::new()])
    }
}

impl DocumentNumbers {
    pub fn slots(&self) -> &[String] {
        &self.0
    }

    pub fn add_slot(&mut self) {
        self.0.push(String::new());
    }

    /// Remove a slot; removing the only slot leaves a single empty one
    pub fn remove_slot(&mut self, index: usize) -> Result<(), DraftError> {
        self.check_index(index)?;
        self.0.remove(index);
        if self.0.is_empty() {
            self.0.push(String::new());
        }
        Ok(())
    }

    /// Store `value` uppercased
    pub fn set(&mut self, index: usize, value: &str) -> Result<(), DraftError> {
        self.check_index(index)?;
        self.0[index] = value.to_uppercase();
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), DraftError> {
        if index < self.0.len() {
            Ok(())
        } else {
            Err(DraftError::SlotOutOfRange {
                index,
                len: self.0.len(),
            })
        }
    }
}

/// Kind of value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    Choice,
    Toggle,
    Date,
}

impl FieldKind {
    fn name(&self) -> &'static str {
        match self {
            Self::Text | Self::Multiline => "text",
            Self::Choice => "choice",
            Self::Toggle => "boolean",
            Self::Date => "date",
        }
    }
}

/// Addressable field of the draft (document numbers use the slot operations)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    TransportType,
    WarehouseLocation,
    LoadingLocation,
    UnloadingLocation,
    DeliveryDate,
    PreferredDeliveryWindow,
    DeliveryCity,
    DeliveryPostalCode,
    DeliveryStreet,
    DeliveryBuildingNumber,
    DeliveryContactPerson,
    DeliveryPhoneNumber,
    DeliveryAdditionalInfo,
    RequesterName,
    RequesterEmail,
    RequesterDepartment,
    Priority,
    PartialDeliveryAllowed,
    EstimatedWeight,
    EstimatedLength,
    EstimatedDimensions,
    SpecialRequirements,
}

impl FieldPath {
    pub const ALL: [FieldPath; 22] = [
        Self::TransportType,
        Self::WarehouseLocation,
        Self::LoadingLocation,
        Self::UnloadingLocation,
        Self::DeliveryDate,
        Self::PreferredDeliveryWindow,
        Self::DeliveryCity,
        Self::DeliveryPostalCode,
        Self::DeliveryStreet,
        Self::DeliveryBuildingNumber,
        Self::DeliveryContactPerson,
        Self::DeliveryPhoneNumber,
        Self::DeliveryAdditionalInfo,
        Self::RequesterName,
        Self::RequesterEmail,
        Self::RequesterDepartment,
        Self::Priority,
        Self::PartialDeliveryAllowed,
        Self::EstimatedWeight,
        Self::EstimatedLength,
        Self::EstimatedDimensions,
        Self::SpecialRequirements,
    ];

    /// Dotted camelCase path, e.g. `deliveryDetails.city`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TransportType => "transportType",
            Self::WarehouseLocation => "warehouseLocation",
            Self::LoadingLocation => "loadingLocation",
            Self::UnloadingLocation => "unloadingLocation",
            Self::DeliveryDate => "deliveryDate",
            Self::PreferredDeliveryWindow => "preferredDeliveryWindow",
            Self::DeliveryCity => "deliveryDetails.city",
            Self::DeliveryPostalCode => "deliveryDetails.postalCode",
            Self::DeliveryStreet => "deliveryDetails.street",
            Self::DeliveryBuildingNumber => "deliveryDetails.buildingNumber",
            Self::DeliveryContactPerson => "deliveryDetails.contactPerson",
            Self::DeliveryPhoneNumber => "deliveryDetails.phoneNumber",
            Self::DeliveryAdditionalInfo => "deliveryDetails.additionalInfo",
            Self::RequesterName => "requester.name",
            Self::RequesterEmail => "requester.email",
            Self::RequesterDepartment => "requester.department",
            Self::Priority => "priority",
            Self::PartialDeliveryAllowed => "partialDeliveryAllowed",
            Self::EstimatedWeight => "estimatedWeight",
            Self::EstimatedLength => "estimatedLength",
            Self::EstimatedDimensions => "estimatedDimensions",
            Self::SpecialRequirements => "specialRequirements",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TransportType => "Transport type",
            Self::WarehouseLocation => "Warehouse",
            Self::LoadingLocation => "Loading location",
            Self::UnloadingLocation => "Unloading location",
            Self::DeliveryDate => "Delivery date",
            Self::PreferredDeliveryWindow => "Preferred hours (HH:MM-HH:MM)",
            Self::DeliveryCity => "City",
            Self::DeliveryPostalCode => "Postal code",
            Self::DeliveryStreet => "Street",
            Self::DeliveryBuildingNumber => "Building number",
            Self::DeliveryContactPerson => "Contact person",
            Self::DeliveryPhoneNumber => "Phone number",
            Self::DeliveryAdditionalInfo => "Additional information",
            Self::RequesterName => "Full name",
            Self::RequesterEmail => "E-mail",
            Self::RequesterDepartment => "Department",
            Self::Priority => "Priority",
            Self::PartialDeliveryAllowed => "Partial delivery allowed",
            Self::EstimatedWeight => "Estimated weight (kg)",
            Self::EstimatedLength => "Estimated load length (cm)",
            Self::EstimatedDimensions => "Estimated dimensions",
            Self::SpecialRequirements => "Special requirements",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::TransportType | Self::WarehouseLocation | Self::Priority => FieldKind::Choice,
            Self::DeliveryDate => FieldKind::Date,
            Self::PartialDeliveryAllowed => FieldKind::Toggle,
            Self::DeliveryAdditionalInfo | Self::SpecialRequirements => FieldKind::Multiline,
            _ => FieldKind::Text,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldPath {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| DraftError::UnknownPath(s.to_string()))
    }
}

/// Value written through [`OrderDraft::set_field`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Date(Option<NaiveDate>),
    Transport(TransportType),
    Warehouse(Option<WarehouseLocation>),
    Priority(Priority),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(Some(value))
    }
}

impl From<TransportType> for FieldValue {
    fn from(value: TransportType) -> Self {
        FieldValue::Transport(value)
    }
}

impl From<WarehouseLocation> for FieldValue {
    fn from(value: WarehouseLocation) -> Self {
        FieldValue::Warehouse(Some(value))
    }
}

impl From<Priority> for FieldValue {
    fn from(value: Priority) -> Self {
        FieldValue::Priority(value)
    }
}

/// The transport order being edited
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderDraft {
    transport: TransportSelection,
    document_numbers: DocumentNumbers,
    delivery_date: Option<NaiveDate>,
    preferred_delivery_window: String,
    delivery_details: DeliveryDetails,
    requester: Requester,
    priority: Priority,
    partial_delivery_allowed: bool,
    estimated_weight: String,
    estimated_length: String,
    estimated_dimensions: String,
    special_requirements: String,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transport(&self) -> &TransportSelection {
        &self.transport
    }

    pub fn transport_type(&self) -> Option<TransportType> {
        self.transport.transport_type()
    }

    pub fn document_numbers(&self) -> &[String] {
        self.document_numbers.slots()
    }

    pub fn delivery_date(&self) -> Option<NaiveDate> {
        self.delivery_date
    }

    pub fn preferred_delivery_window(&self) -> &str {
        &self.preferred_delivery_window
    }

    pub fn delivery_details(&self) -> &DeliveryDetails {
        &self.delivery_details
    }

    pub fn requester(&self) -> &Requester {
        &self.requester
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn partial_delivery_allowed(&self) -> bool {
        self.partial_delivery_allowed
    }

    pub fn estimated_weight(&self) -> &str {
        &self.estimated_weight
    }

    pub fn estimated_length(&self) -> &str {
        &self.estimated_length
    }

    pub fn estimated_dimensions(&self) -> &str {
        &self.estimated_dimensions
    }

    pub fn special_requirements(&self) -> &str {
        &self.special_requirements
    }

    /// Whether `path` belongs to the currently selected transport group
    pub fn is_field_active(&self, path: FieldPath) -> bool {
        match path {
            FieldPath::WarehouseLocation => {
                matches!(self.transport, TransportSelection::Warehouse { .. })
            }
            FieldPath::LoadingLocation | FieldPath::UnloadingLocation => {
                matches!(self.transport, TransportSelection::Producer { .. })
            }
            _ => true,
        }
    }

    /// Current text of a text field, `None` for non-text or inactive fields
    pub fn text_field(&self, path: FieldPath) -> Option<&str> {
        let value = match path {
            FieldPath::LoadingLocation => match &self.transport {
                TransportSelection::Producer {
                    loading_location, ..
                } => loading_location,
                _ => return None,
            },
            FieldPath::UnloadingLocation => match &self.transport {
                TransportSelection::Producer {
                    unloading_location, ..
                } => unloading_location,
                _ => return None,
            },
            FieldPath::PreferredDeliveryWindow => &self.preferred_delivery_window,
            FieldPath::DeliveryCity => &self.delivery_details.city,
            FieldPath::DeliveryPostalCode => &self.delivery_details.postal_code,
            FieldPath::DeliveryStreet => &self.delivery_details.street,
            FieldPath::DeliveryBuildingNumber => &self.delivery_details.building_number,
            FieldPath::DeliveryContactPerson => &self.delivery_details.contact_person,
            FieldPath::DeliveryPhoneNumber => &self.delivery_details.phone_number,
            FieldPath::DeliveryAdditionalInfo => &self.delivery_details.additional_info,
            FieldPath::RequesterName => &self.requester.name,
            FieldPath::RequesterEmail => &self.requester.email,
            FieldPath::RequesterDepartment => &self.requester.department,
            FieldPath::EstimatedWeight => &self.estimated_weight,
            FieldPath::EstimatedLength => &self.estimated_length,
            FieldPath::EstimatedDimensions => &self.estimated_dimensions,
            FieldPath::SpecialRequirements => &self.special_requirements,
            _ => return None,
        };
        Some(value)
    }

    /// Write `value` at `path`. Only the shape of the value is checked here;
    /// format rules are evaluated by the step gates.
    pub fn set_field(&mut self, path: FieldPath, value: FieldValue) -> Result<(), DraftError> {
        match path {
            FieldPath::TransportType => {
                let transport_type = match value {
                    FieldValue::Transport(t) => t,
                    FieldValue::Text(code) => TransportType::from_code(&code)
                        .ok_or(DraftError::UnknownOption { path, value: code })?,
                    _ => return Err(mismatch(path)),
                };
                self.transport.select(transport_type);
            }
            FieldPath::WarehouseLocation => {
                let location = match value {
                    FieldValue::Warehouse(w) => w,
                    FieldValue::Text(code) if code.is_empty() => None,
                    FieldValue::Text(code) => Some(
                        WarehouseLocation::from_code(&code)
                            .ok_or(DraftError::UnknownOption { path, value: code })?,
                    ),
                    _ => return Err(mismatch(path)),
                };
                match &mut self.transport {
                    TransportSelection::Warehouse { warehouse } => *warehouse = location,
                    _ => return Err(DraftError::InactiveField(path)),
                }
            }
            FieldPath::Priority => {
                self.priority = match value {
                    FieldValue::Priority(p) => p,
                    FieldValue::Text(code) => Priority::from_code(&code)
                        .ok_or(DraftError::UnknownOption { path, value: code })?,
                    _ => return Err(mismatch(path)),
                };
            }
            FieldPath::DeliveryDate => match value {
                FieldValue::Date(date) => self.delivery_date = date,
                _ => return Err(mismatch(path)),
            },
            FieldPath::PartialDeliveryAllowed => match value {
                FieldValue::Flag(flag) => self.partial_delivery_allowed = flag,
                _ => return Err(mismatch(path)),
            },
            _ => match value {
                FieldValue::Text(text) => *self.text_field_mut(path)? = text,
                _ => return Err(mismatch(path)),
            },
        }
        Ok(())
    }

    fn text_field_mut(&mut self, path: FieldPath) -> Result<&mut String, DraftError> {
        let slot = match path {
            FieldPath::LoadingLocation => match &mut self.transport {
                TransportSelection::Producer {
                    loading_location, ..
                } => loading_location,
                _ => return Err(DraftError::InactiveField(path)),
            },
            FieldPath::UnloadingLocation => match &mut self.transport {
                TransportSelection::Producer {
                    unloading_location, ..
                } => unloading_location,
                _ => return Err(DraftError::InactiveField(path)),
            },
            FieldPath::PreferredDeliveryWindow => &mut self.preferred_delivery_window,
            FieldPath::DeliveryCity => &mut self.delivery_details.city,
            FieldPath::DeliveryPostalCode => &mut self.delivery_details.postal_code,
            FieldPath::DeliveryStreet => &mut self.delivery_details.street,
            FieldPath::DeliveryBuildingNumber => &mut self.delivery_details.building_number,
            FieldPath::DeliveryContactPerson => &mut self.delivery_details.contact_person,
            FieldPath::DeliveryPhoneNumber => &mut self.delivery_details.phone_number,
            FieldPath::DeliveryAdditionalInfo => &mut self.delivery_details.additional_info,
            FieldPath::RequesterName => &mut self.requester.name,
            FieldPath::RequesterEmail => &mut self.requester.email,
            FieldPath::RequesterDepartment => &mut self.requester.department,
            FieldPath::EstimatedWeight => &mut self.estimated_weight,
            FieldPath::EstimatedLength => &mut self.estimated_length,
            FieldPath::EstimatedDimensions => &mut self.estimated_dimensions,
            FieldPath::SpecialRequirements => &mut self.special_requirements,
            _ => return Err(mismatch(path)),
        };
        Ok(slot)
    }

    pub fn add_document_number_slot(&mut self) {
        self.document_numbers.add_slot();
    }

    pub fn remove_document_number_slot(&mut self, index: usize) -> Result<(), DraftError> {
        self.document_numbers.remove_slot(index)
    }

    pub fn set_document_number(&mut self, index: usize, value: &str) -> Result<(), DraftError> {
        self.document_numbers.set(index, value)
    }
}

fn mismatch(path: FieldPath) -> DraftError {
    DraftError::TypeMismatch {
        path,
        expected: path.kind().name(),
    }
}
