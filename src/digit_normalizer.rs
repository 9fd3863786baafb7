use thiserror::Error;

/// Decimal digits of a card number, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DigitSequence(Vec<u8>);

impl DigitSequence {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The declared check digit, i.e. the last digit.
    pub fn check_digit(&self) -> Option<u8> {
        self.0.last().copied()
    }

    /// Every digit except the check digit.
    pub fn payload(&self) -> &[u8] {
        match self.0.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("non-digit character {character:?} at position {position}")]
    NonDigit { position: usize, character: char },
}

/// Converts a card number into its digits. Only ASCII `0`-`9` are accepted;
/// the first other character fails the whole conversion.
pub fn normalize(card: &str) -> Result<DigitSequence, NormalizeError> {
    let mut digits = Vec::with_capacity(card.len());
    for (position, character) in card.chars().enumerate() {
        match character.to_digit(10) {
            Some(digit) => digits.push(digit as u8),
            None => {
                tracing::debug!(position, character = %character, "non-digit character in card number");
                return Err(NormalizeError::NonDigit { position, character });
            }
        }
    }
    Ok(DigitSequence(digits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_digits() {
        let digits = normalize("4532015112830366").unwrap();
        assert_eq!(digits.len(), 16);
        assert_eq!(digits.as_slice()[..4], [4, 5, 3, 2]);
        assert_eq!(digits.check_digit(), Some(6));
        assert_eq!(digits.payload().len(), 15);
    }

    #[test]
    fn test_normalize_empty() {
        let digits = normalize("").unwrap();
        assert!(digits.is_empty());
        assert_eq!(digits.check_digit(), None);
        assert!(digits.payload().is_empty());
    }

    #[test]
    fn test_normalize_rejects_separators() {
        assert_eq!(
            normalize("4111 1111").unwrap_err(),
            NormalizeError::NonDigit { position: 4, character: ' ' }
        );
        assert!(normalize("4111-1111").is_err());
    }

    #[test]
    fn test_normalize_reports_char_position() {
        // "é" is two bytes; the position counts characters.
        assert_eq!(
            normalize("1é2x").unwrap_err(),
            NormalizeError::NonDigit { position: 1, character: 'é' }
        );
    }

    #[test]
    fn test_normalize_rejects_non_ascii_digits() {
        // Arabic-Indic digit one
        assert!(normalize("12\u{0661}").is_err());
    }
}
