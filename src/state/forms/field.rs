//! Input masks applied while typing into text fields

use crate::order::{FieldPath, PHONE_DIGITS};

const POSTAL_CODE_GROUPS: &[usize] = &[2, 3];
const PHONE_GROUPS: &[usize] = &[3, 3, 3];

/// Keystroke filter for a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMask {
    #[default]
    None,
    /// `NN-NNN`
    PostalCode,
    /// `NNN-NNN-NNN`
    Phone,
    Uppercase,
}

impl InputMask {
    pub fn for_path(path: FieldPath) -> Self {
        match path {
            FieldPath::DeliveryPostalCode => Self::PostalCode,
            FieldPath::DeliveryPhoneNumber => Self::Phone,
            _ => Self::None,
        }
    }

    /// Mask used by the WZ number slots
    pub fn document_number() -> Self {
        Self::Uppercase
    }

    /// Value after typing `c`, or `None` when the keystroke is refused
    pub fn push_char(&self, current: &str, c: char) -> Option<String> {
        match self {
            Self::None => {
                let mut value = current.to_string();
                value.push(c);
                Some(value)
            }
            Self::Uppercase => {
                let mut value = current.to_string();
                value.extend(c.to_uppercase());
                Some(value)
            }
            Self::PostalCode | Self::Phone => {
                if !c.is_ascii_digit() {
                    return None;
                }
                let mut digits = digits_of(current);
                if digits.len() >= self.max_digits() {
                    return None;
                }
                digits.push(c);
                Some(group_digits(&digits, self.groups()))
            }
        }
    }

    /// Value after a backspace
    pub fn pop_char(&self, current: &str) -> String {
        match self {
            Self::None | Self::Uppercase => {
                let mut value = current.to_string();
                value.pop();
                value
            }
            Self::PostalCode | Self::Phone => {
                let mut digits = digits_of(current);
                digits.pop();
                group_digits(&digits, self.groups())
            }
        }
    }

    /// Placeholder shown while the field is empty
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::PostalCode => Some("00-000"),
            Self::Phone => Some("000-000-000"),
            Self::None | Self::Uppercase => None,
        }
    }

    fn groups(&self) -> &'static [usize] {
        match self {
            Self::PostalCode => POSTAL_CODE_GROUPS,
            Self::Phone => PHONE_GROUPS,
            Self::None | Self::Uppercase => &[],
        }
    }

    fn max_digits(&self) -> usize {
        match self {
            Self::Phone => PHONE_DIGITS,
            _ => self.groups().iter().sum(),
        }
    }
}

fn digits_of(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Join digits with `-` between groups; a dash appears once the next group starts
fn group_digits(digits: &str, groups: &[usize]) -> String {
    let mut out = String::with_capacity(digits.len() + groups.len());
    let mut rest = digits;
    for (i, size) in groups.iter().enumerate() {
        if rest.is_empty() {
            break;
        }
        if i > 0 {
            out.push('-');
        }
        let take = (*size).min(rest.len());
        out.push_str(&rest[..take]);
        rest = &rest[take..];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_all(mask: InputMask, input: &str) -> String {
        input.chars().fold(String::new(), |value, c| {
            mask.push_char(&value, c).unwrap_or(value)
        })
    }

    mod postal_code {
        use super::*;

        #[test]
        fn test_formats_as_typed() {
            assert_eq!(type_all(InputMask::PostalCode, "3"), "3");
            assert_eq!(type_all(InputMask::PostalCode, "31"), "31");
            assert_eq!(type_all(InputMask::PostalCode, "310"), "31-0");
            assert_eq!(type_all(InputMask::PostalCode, "31042"), "31-042");
        }

        #[test]
        fn test_refuses_extra_and_non_digits() {
            assert_eq!(type_all(InputMask::PostalCode, "31-0429"), "31-042");
            assert_eq!(InputMask::PostalCode.push_char("31", 'a'), None);
        }

        #[test]
        fn test_backspace_drops_dash_with_digit() {
            assert_eq!(InputMask::PostalCode.pop_char("31-0"), "31");
            assert_eq!(InputMask::PostalCode.pop_char(""), "");
        }
    }

    mod phone {
        use super::*;
        use crate::order::phone_digit_count;

        #[test]
        fn test_formats_nine_digits() {
            let value = type_all(InputMask::Phone, "512345678");
            assert_eq!(value, "512-345-678");
            assert_eq!(phone_digit_count(&value), 9);
        }

        #[test]
        fn test_stops_at_nine_digits() {
            assert_eq!(type_all(InputMask::Phone, "5123456789"), "512-345-678");
        }

        #[test]
        fn test_partial_input() {
            assert_eq!(type_all(InputMask::Phone, "5123"), "512-3");
            assert_eq!(InputMask::Phone.pop_char("512-3"), "512");
        }
    }

    #[test]
    fn test_uppercase_mask() {
        assert_eq!(type_all(InputMask::document_number(), "wz/1"), "WZ/1");
    }

    #[test]
    fn test_plain_mask_keeps_input() {
        assert_eq!(type_all(InputMask::None, "Kraków 1"), "Kraków 1");
        assert_eq!(InputMask::None.pop_char("ó"), "");
    }

    #[test]
    fn test_masks_by_path() {
        assert_eq!(
            InputMask::for_path(FieldPath::DeliveryPostalCode),
            InputMask::PostalCode
        );
        assert_eq!(
            InputMask::for_path(FieldPath::DeliveryPhoneNumber),
            InputMask::Phone
        );
        assert_eq!(InputMask::for_path(FieldPath::DeliveryCity), InputMask::None);
    }
}
