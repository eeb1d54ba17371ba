//! Field validators and step gates
//!
//! Every predicate here is pure and total: it never panics and never
//! mutates the draft. Gates are evaluated on demand, so the answer always
//! reflects the current field values.

use super::draft::{OrderDraft, TransportSelection};
use super::steps::WizardStep;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Year token accepted at the end of a WZ number unless configured otherwise
pub const DEFAULT_DOCUMENT_YEAR_SUFFIX: &str = "24";

/// Required number of digits in a delivery phone number
pub const PHONE_DIGITS: usize = 9;

// A pattern that fails to compile matches nothing
type Pattern = Result<Regex, regex::Error>;

static DEFAULT_DOCUMENT_PATTERN: LazyLock<Pattern> =
    LazyLock::new(|| document_pattern(DEFAULT_DOCUMENT_YEAR_SUFFIX));

static DELIVERY_WINDOW_PATTERN: LazyLock<Pattern> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}-[0-9]{2}:[0-9]{2}$"));

fn document_pattern(year_suffix: &str) -> Pattern {
    Regex::new(&format!(
        r"^WZ/[0-9]{{5}}/[0-9]{{2}}/[A-Z]{{3}}/{}$",
        regex::escape(year_suffix)
    ))
}

fn pattern_matches(pattern: &Pattern, value: &str) -> bool {
    pattern.as_ref().is_ok_and(|re| re.is_match(value))
}

/// Which observed form layout the wizard follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormVariant {
    /// Transport type only; no preferred delivery hours
    Basic,
    /// Warehouse sub-choice and preferred delivery hours are required
    #[default]
    Full,
}

impl FormVariant {
    pub fn collects_delivery_window(&self) -> bool {
        matches!(self, Self::Full)
    }
}

/// WZ document number format: `WZ/NNNNN/NN/AAA/<year>`
#[derive(Debug, Clone)]
pub struct DocumentNumberFormat {
    year_suffix: String,
    pattern: Pattern,
}

impl Default for DocumentNumberFormat {
    fn default() -> Self {
        Self {
            year_suffix: DEFAULT_DOCUMENT_YEAR_SUFFIX.to_string(),
            pattern: DEFAULT_DOCUMENT_PATTERN.clone(),
        }
    }
}

impl DocumentNumberFormat {
    pub fn with_year_suffix(year_suffix: &str) -> Self {
        Self {
            year_suffix: year_suffix.to_string(),
            pattern: document_pattern(year_suffix),
        }
    }

    pub fn year_suffix(&self) -> &str {
        &self.year_suffix
    }

    pub fn is_valid(&self, value: &str) -> bool {
        pattern_matches(&self.pattern, value)
    }

    /// Input placeholder, e.g. `WZ/00000/00/AAA/24`
    pub fn placeholder(&self) -> String {
        format!("WZ/00000/00/AAA/{}", self.year_suffix())
    }
}

/// `HH:MM-HH:MM`; the clock values themselves are not range-checked
pub fn is_valid_delivery_window(value: &str) -> bool {
    pattern_matches(&DELIVERY_WINDOW_PATTERN, value)
}

pub fn phone_digit_count(value: &str) -> usize {
    value.chars().filter(|c| c.is_ascii_digit()).count()
}

pub fn is_valid_phone_number(value: &str) -> bool {
    phone_digit_count(value) == PHONE_DIGITS
}

/// Only days strictly after `today` can be picked
pub fn is_selectable_delivery_date(date: NaiveDate, today: NaiveDate) -> bool {
    date > today
}

fn all_present(values: &[&str]) -> bool {
    values.iter().all(|v| !v.is_empty())
}

/// Rules that gate the forward edge out of each step
#[derive(Debug, Clone, Default)]
pub struct StepGates {
    pub variant: FormVariant,
    pub document_format: DocumentNumberFormat,
}

impl StepGates {
    pub fn new(variant: FormVariant, document_format: DocumentNumberFormat) -> Self {
        Self {
            variant,
            document_format,
        }
    }

    /// Pull-based gate check, recomputed from the draft on every call
    pub fn is_step_valid(&self, step: WizardStep, draft: &OrderDraft) -> bool {
        (step.definition().gate)(self, draft)
    }

    pub(crate) fn transport_valid(&self, draft: &OrderDraft) -> bool {
        match (self.variant, draft.transport()) {
            (_, TransportSelection::Unselected) => false,
            (FormVariant::Basic, _) => true,
            (FormVariant::Full, TransportSelection::Warehouse { warehouse }) => warehouse.is_some(),
            (FormVariant::Full, TransportSelection::Producer { .. }) => true,
        }
    }

    pub(crate) fn document_numbers_valid(&self, draft: &OrderDraft) -> bool {
        draft
            .document_numbers()
            .iter()
            .any(|n| self.document_format.is_valid(n))
    }

    pub(crate) fn delivery_date_valid(&self, draft: &OrderDraft) -> bool {
        draft.delivery_date().is_some()
            && (!self.variant.collects_delivery_window()
                || is_valid_delivery_window(draft.preferred_delivery_window()))
    }

    /// Document numbers that will be left out of the payload
    pub fn malformed_document_numbers<'a>(&self, draft: &'a OrderDraft) -> Vec<&'a str> {
        draft
            .document_numbers()
            .iter()
            .filter(|n| !n.is_empty() && !self.document_format.is_valid(n))
            .map(String::as_str)
            .collect()
    }

    pub(crate) fn delivery_details_valid(&self, draft: &OrderDraft) -> bool {
        let d = draft.delivery_details();
        all_present(&[
            d.city.as_str(),
            d.postal_code.as_str(),
            d.street.as_str(),
            d.building_number.as_str(),
            d.contact_person.as_str(),
        ]) && is_valid_phone_number(&d.phone_number)
    }

    pub(crate) fn requester_valid(&self, draft: &OrderDraft) -> bool {
        let r = draft.requester();
        all_present(&[r.name.as_str(), r.email.as_str(), r.department.as_str()])
    }

    pub(crate) fn summary_valid(&self, _draft: &OrderDraft) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::draft::{FieldPath, FieldValue, TransportType, WarehouseLocation};
    use proptest::prelude::*;

    fn is_valid_document_number(value: &str) -> bool {
        DocumentNumberFormat::default().is_valid(value)
    }

    fn set(draft: &mut OrderDraft, path: FieldPath, value: impl Into<FieldValue>) {
        draft.set_field(path, value.into()).unwrap();
    }

    mod document_number {
        use super::*;

        #[test]
        fn test_accepts_exact_format() {
            assert!(is_valid_document_number("WZ/00001/24/ABC/24"));
            assert!(is_valid_document_number("WZ/12345/01/XYZ/24"));
        }

        #[test]
        fn test_rejects_near_misses() {
            for bad in [
                "",
                "bad-entry",
                "WZ/0001/24/ABC/24",
                "WZ/000001/24/ABC/24",
                "WZ/00001/2/ABC/24",
                "WZ/00001/24/AB/24",
                "WZ/00001/24/abc/24",
                "WZ/00001/24/ABC/25",
                "WZ/00001/24/ABC/2024",
                "wz/00001/24/ABC/24",
                " WZ/00001/24/ABC/24",
                "WZ/00001/24/ABC/24\n",
                "WZ/٠٠٠٠١/24/ABC/24",
            ] {
                assert!(!is_valid_document_number(bad), "accepted {bad:?}");
            }
        }

        #[test]
        fn test_configured_year_suffix() {
            let format = DocumentNumberFormat::with_year_suffix("25");
            assert!(format.is_valid("WZ/00001/24/ABC/25"));
            assert!(!format.is_valid("WZ/00001/24/ABC/24"));
            assert_eq!(format.placeholder(), "WZ/00000/00/AAA/25");
        }

        #[test]
        fn test_default_format_matches_free_function() {
            let format = DocumentNumberFormat::default();
            assert_eq!(format.year_suffix(), "24");
            assert!(format.is_valid("WZ/00001/24/ABC/24"));
        }

        fn reference_match(s: &str) -> bool {
            let parts: Vec<&str> = s.split('/').collect();
            let digits = |p: &str, n: usize| p.len() == n && p.bytes().all(|b| b.is_ascii_digit());
            parts.len() == 5
                && parts[0] == "WZ"
                && digits(parts[1], 5)
                && digits(parts[2], 2)
                && parts[3].len() == 3
                && parts[3].bytes().all(|b| b.is_ascii_uppercase())
                && parts[4] == "24"
        }

        proptest! {
            #[test]
            fn prop_validator_agrees_with_reference(s in "(WZ|wz|W)?/?[0-9A-Za-z]{0,6}/?[0-9]{0,3}/?[A-Za-z]{0,4}/?(24|25)?") {
                prop_assert_eq!(is_valid_document_number(&s), reference_match(&s));
            }

            #[test]
            fn prop_well_formed_numbers_accepted(a in "[0-9]{5}", b in "[0-9]{2}", c in "[A-Z]{3}") {
                let candidate = format!("WZ/{a}/{b}/{c}/24");
                prop_assert!(is_valid_document_number(&candidate));
            }

            #[test]
            fn prop_arbitrary_strings_agree_with_reference(s in ".*") {
                prop_assert_eq!(is_valid_document_number(&s), reference_match(&s));
            }
        }
    }

    mod phone {
        use super::*;

        #[test]
        fn test_separators_are_ignored() {
            assert!(is_valid_phone_number("123-456-789"));
            assert!(is_valid_phone_number("123456789"));
            assert!(is_valid_phone_number("(12) 345 67 89"));
        }

        #[test]
        fn test_digit_count_must_be_exact() {
            assert!(!is_valid_phone_number("12345678"));
            assert!(!is_valid_phone_number("+48 123 456 789"));
            assert!(!is_valid_phone_number(""));
        }

        proptest! {
            #[test]
            fn prop_punctuation_does_not_change_validity(digits in "[0-9]{0,12}", sep in "[- ().]") {
                let spaced: String = digits
                    .chars()
                    .flat_map(|c| [c, sep.chars().next().unwrap_or('-')])
                    .collect();
                prop_assert_eq!(is_valid_phone_number(&digits), is_valid_phone_number(&spaced));
                prop_assert_eq!(is_valid_phone_number(&digits), digits.len() == PHONE_DIGITS);
            }
        }
    }

    mod delivery_window {
        use super::*;

        #[test]
        fn test_pattern() {
            assert!(is_valid_delivery_window("10:00-14:00"));
            assert!(is_valid_delivery_window("99:99-00:00"));
            assert!(!is_valid_delivery_window("10:00 - 14:00"));
            assert!(!is_valid_delivery_window("1:00-14:00"));
            assert!(!is_valid_delivery_window(""));
        }

        #[test]
        fn test_date_must_be_after_today() {
            let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
            assert!(!is_selectable_delivery_date(today, today));
            assert!(!is_selectable_delivery_date(today.pred_opt().unwrap(), today));
            assert!(is_selectable_delivery_date(today.succ_opt().unwrap(), today));
        }
    }

    mod gates {
        use super::*;

        fn full() -> StepGates {
            StepGates::default()
        }

        fn basic() -> StepGates {
            StepGates::new(FormVariant::Basic, DocumentNumberFormat::default())
        }

        #[test]
        fn test_transport_requires_selection() {
            let draft = OrderDraft::new();
            assert!(!full().is_step_valid(WizardStep::Transport, &draft));
            assert!(!basic().is_step_valid(WizardStep::Transport, &draft));
        }

        #[test]
        fn test_full_variant_requires_warehouse_for_own_transport() {
            let mut draft = OrderDraft::new();
            set(&mut draft, FieldPath::TransportType, TransportType::Warehouse);
            assert!(!full().is_step_valid(WizardStep::Transport, &draft));
            assert!(basic().is_step_valid(WizardStep::Transport, &draft));

            set(&mut draft, FieldPath::WarehouseLocation, WarehouseLocation::Lublin);
            assert!(full().is_step_valid(WizardStep::Transport, &draft));
        }

        #[test]
        fn test_producer_needs_no_warehouse() {
            let mut draft = OrderDraft::new();
            set(&mut draft, FieldPath::TransportType, TransportType::Producer);
            assert!(full().is_step_valid(WizardStep::Transport, &draft));
        }

        #[test]
        fn test_document_numbers_need_one_valid_entry() {
            let mut draft = OrderDraft::new();
            assert!(!full().is_step_valid(WizardStep::DocumentNumbers, &draft));
            draft.set_document_number(0, "bad-entry").unwrap();
            assert!(!full().is_step_valid(WizardStep::DocumentNumbers, &draft));
            draft.add_document_number_slot();
            draft.set_document_number(1, "WZ/00001/24/ABC/24").unwrap();
            assert!(full().is_step_valid(WizardStep::DocumentNumbers, &draft));
            assert_eq!(full().malformed_document_numbers(&draft), vec!["BAD-ENTRY"]);
        }

        #[test]
        fn test_delivery_date_step_per_variant() {
            let mut draft = OrderDraft::new();
            let date = NaiveDate::from_ymd_opt(2030, 3, 4).unwrap();
            assert!(!basic().is_step_valid(WizardStep::DeliveryDate, &draft));

            set(&mut draft, FieldPath::DeliveryDate, date);
            assert!(basic().is_step_valid(WizardStep::DeliveryDate, &draft));
            assert!(!full().is_step_valid(WizardStep::DeliveryDate, &draft));

            set(&mut draft, FieldPath::PreferredDeliveryWindow, "08:00-12:00");
            assert!(full().is_step_valid(WizardStep::DeliveryDate, &draft));
        }

        #[test]
        fn test_delivery_details_step() {
            let mut draft = OrderDraft::new();
            set(&mut draft, FieldPath::DeliveryCity, "Gdynia");
            set(&mut draft, FieldPath::DeliveryPostalCode, "81-001");
            set(&mut draft, FieldPath::DeliveryStreet, "Portowa");
            set(&mut draft, FieldPath::DeliveryBuildingNumber, "7");
            set(&mut draft, FieldPath::DeliveryContactPerson, "Anna Nowak");
            set(&mut draft, FieldPath::DeliveryPhoneNumber, "12345678");
            assert!(!full().is_step_valid(WizardStep::DeliveryDetails, &draft));

            set(&mut draft, FieldPath::DeliveryPhoneNumber, "123-456-789");
            assert!(full().is_step_valid(WizardStep::DeliveryDetails, &draft));

            set(&mut draft, FieldPath::DeliveryStreet, "");
            assert!(!full().is_step_valid(WizardStep::DeliveryDetails, &draft));
        }

        #[test]
        fn test_requester_step_requires_email_presence_only() {
            let mut draft = OrderDraft::new();
            set(&mut draft, FieldPath::RequesterName, "Jan Kowalski");
            set(&mut draft, FieldPath::RequesterDepartment, "Sales");
            assert!(!full().is_step_valid(WizardStep::Requester, &draft));

            set(&mut draft, FieldPath::RequesterEmail, "not-an-email");
            assert!(full().is_step_valid(WizardStep::Requester, &draft));
        }

        #[test]
        fn test_summary_is_always_valid() {
            assert!(full().is_step_valid(WizardStep::Summary, &OrderDraft::new()));
        }
    }
}
