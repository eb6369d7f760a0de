//! Input validators shared by the creation and edit wizards.

use thiserror::Error;

/// Why a piece of wizard input was rejected. Each variant maps to a
/// re-prompt in the same wizard step; validation never loses state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("value must not be empty")]
    Empty,
    #[error("value is too long")]
    TooLong,
    #[error("price must be a number")]
    NotANumber,
    #[error("price must be greater than zero")]
    NotPositive,
}

const MAX_NAME_LEN: usize = 255;
const MAX_DESCRIPTION_LEN: usize = 2000;

/// Validates a product name: trimmed, non-empty, bounded.
pub fn validate_name(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong);
    }
    Ok(trimmed.to_string())
}

/// Validates a product description with the same rules as the name but a
/// larger cap.
pub fn validate_description(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong);
    }
    Ok(trimmed.to_string())
}

/// Parses a price. Accepts a decimal comma for European input; the result
/// must be a finite number strictly greater than zero.
pub fn validate_price(input: &str) -> Result<f64, ValidationError> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return Err(ValidationError::Empty);
    }
    let price: f64 = normalized
        .parse()
        .map_err(|_| ValidationError::NotANumber)?;
    if !price.is_finite() {
        return Err(ValidationError::NotANumber);
    }
    if price <= 0.0 {
        return Err(ValidationError::NotPositive);
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_validation() {
        // Valid names
        assert_eq!(validate_name("Blue Jacket").unwrap(), "Blue Jacket");
        assert_eq!(validate_name("  Blue Jacket  ").unwrap(), "Blue Jacket");

        // Invalid names
        assert_eq!(validate_name(""), Err(ValidationError::Empty));
        assert_eq!(validate_name("   "), Err(ValidationError::Empty));
        assert_eq!(
            validate_name(&"a".repeat(256)),
            Err(ValidationError::TooLong)
        );
    }

    #[test]
    fn test_length_caps_count_characters_not_bytes() {
        // Multibyte input up to the cap is fine
        assert!(validate_name(&"ё".repeat(255)).is_ok());
        assert_eq!(
            validate_name(&"ё".repeat(256)),
            Err(ValidationError::TooLong)
        );

        assert!(validate_description(&"ё".repeat(2000)).is_ok());
        assert_eq!(
            validate_description(&"ё".repeat(2001)),
            Err(ValidationError::TooLong)
        );
    }

    #[test]
    fn test_price_validation() {
        assert_eq!(validate_price("2990").unwrap(), 2990.0);
        assert_eq!(validate_price("49.90").unwrap(), 49.90);
        assert_eq!(validate_price("49,90").unwrap(), 49.90);
        assert_eq!(validate_price(" 100 ").unwrap(), 100.0);

        assert_eq!(validate_price("abc"), Err(ValidationError::NotANumber));
        assert_eq!(validate_price("12abc"), Err(ValidationError::NotANumber));
        assert_eq!(validate_price(""), Err(ValidationError::Empty));
        assert_eq!(validate_price("0"), Err(ValidationError::NotPositive));
        assert_eq!(validate_price("-5"), Err(ValidationError::NotPositive));
        assert_eq!(validate_price("inf"), Err(ValidationError::NotANumber));
        assert_eq!(validate_price("NaN"), Err(ValidationError::NotANumber));
    }

    #[test]
    fn test_description_validation() {
        assert!(validate_description("Warm winter jacket").is_ok());
        assert_eq!(validate_description("  "), Err(ValidationError::Empty));
        assert_eq!(
            validate_description(&"a".repeat(2001)),
            Err(ValidationError::TooLong)
        );
    }
}
