use crate::digit_normalizer::{normalize, DigitSequence};

/// Luhn check digit for `payload` (the digits preceding the check digit).
///
/// Walking right to left, the digit nearest the check digit and every
/// second one after it is doubled, with doubled values above 9 reduced by 9.
/// An empty payload yields 0.
pub fn expected_check_digit(payload: &[u8]) -> u8 {
    let sum: u32 = payload
        .iter()
        .rev()
        .enumerate()
        .map(|(distance, &digit)| {
            let digit = u32::from(digit);
            if distance % 2 == 0 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();

    ((10 - sum % 10) % 10) as u8
}

pub fn is_valid_sequence(digits: &DigitSequence) -> bool {
    let Some(check_value) = digits.check_digit() else {
        return false;
    };
    let luhn_value = expected_check_digit(digits.payload());
    tracing::debug!(check_value, luhn_value, "luhn check");
    luhn_value == check_value
}

/// True iff `card` is non-empty, all ASCII digits, and ends in its Luhn
/// check digit.
pub fn validate(card: &str) -> bool {
    match normalize(card) {
        Ok(digits) => is_valid_sequence(&digits),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_check_digit() {
        assert_eq!(expected_check_digit(&[7, 9, 9, 2, 7, 3, 9, 8, 7, 1]), 3);
        assert_eq!(expected_check_digit(&[1]), 8);
        assert_eq!(expected_check_digit(&[]), 0);
    }

    #[test]
    fn test_validate_known_numbers() {
        assert!(validate("4532015112830366"));
        assert!(validate("371449635398431"));
        assert!(validate("6011111111111117"));
        assert!(validate("79927398713"));
    }

    #[test]
    fn test_validate_checksum_mismatch() {
        assert!(!validate("1234567890123456"));
        assert!(!validate("4532015112830367"));
        assert!(!validate("79927398710"));
    }

    #[test]
    fn test_validate_rejects_non_digits() {
        assert!(!validate("abcd"));
        assert!(!validate("4532 0151 1283 0366"));
        assert!(!validate("4532015112830366\n"));
    }

    #[test]
    fn test_validate_empty() {
        assert!(!validate(""));
    }

    #[test]
    fn test_validate_single_digit() {
        assert!(validate("0"));
        for d in 1..=9 {
            assert!(!validate(&d.to_string()));
        }
    }

    #[test]
    fn test_appending_check_digit_always_validates() {
        for payload in ["4", "37144963539843", "222100000000000", "123456789"] {
            let digits = normalize(payload).unwrap();
            let check = expected_check_digit(digits.as_slice());
            assert!(validate(&format!("{payload}{check}")), "{payload}{check}");
        }
    }

    #[test]
    fn test_validate_is_pure() {
        let card = "4532015112830366";
        assert_eq!(validate(card), validate(card));
        assert_eq!(crate::classify(card), crate::classify(card));
    }

    #[test]
    fn test_any_non_digit_invalidates() {
        let card = "4532015112830366";
        assert!(validate(card));

        for byte in (0u8..128).filter(|b| !b.is_ascii_digit()) {
            let ch = char::from(byte);
            for position in [0, 7, card.len()] {
                let mut mangled = card.to_string();
                mangled.insert(position, ch);
                assert!(!validate(&mangled), "{:?} at {}", ch, position);
            }
            let replaced: String = card.chars().take(15).chain(std::iter::once(ch)).collect();
            assert!(!validate(&replaced), "{:?} as check digit", ch);
        }
    }
}
