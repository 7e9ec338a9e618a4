//! Numeric input and display
//!
//! Quantities are plain `f64`. This module owns the two edges where text
//! meets numbers: parsing what a user typed, and rendering a result with a
//! fixed number of decimals.

use thiserror::Error;

/// Error type for numeric input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("Invalid number format: '{0}'")]
    ParseError(String),

    #[error("Value must be finite, got {0}")]
    NonFinite(f64),
}

/// Decimals used when a result is rendered for display
pub const DEFAULT_DECIMALS: usize = 2;

/// Parse raw text input into a finite number.
///
/// Surrounding whitespace is ignored. Anything `f64` cannot parse is a
/// `ParseError`; spellings such as `"inf"` or `"NaN"` parse but are then
/// rejected as `NonFinite`.
pub fn parse_number_input(s: &str) -> Result<f64, NumberError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(NumberError::ParseError(s.to_string()));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| NumberError::ParseError(trimmed.to_string()))?;

    ensure_finite(value)
}

/// Reject NaN and infinities
pub fn ensure_finite(value: f64) -> Result<f64, NumberError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumberError::NonFinite(value))
    }
}

/// Render with exactly `decimals` digits after the point
pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_and_decimal() {
        assert_eq!(parse_number_input("42").unwrap(), 42.0);
        assert_eq!(parse_number_input("3.5").unwrap(), 3.5);
        assert_eq!(parse_number_input("-0.25").unwrap(), -0.25);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_number_input("  3.5 \n").unwrap(), 3.5);
    }

    #[test]
    fn test_parse_scientific() {
        assert_eq!(parse_number_input("1.5e2").unwrap(), 150.0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_number_input("abc"), Err(NumberError::ParseError(_))));
        assert!(matches!(parse_number_input(""), Err(NumberError::ParseError(_))));
        assert!(matches!(parse_number_input("   "), Err(NumberError::ParseError(_))));
        assert!(matches!(parse_number_input("12 km"), Err(NumberError::ParseError(_))));
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert!(matches!(parse_number_input("inf"), Err(NumberError::NonFinite(_))));
        assert!(matches!(parse_number_input("-infinity"), Err(NumberError::NonFinite(_))));
        assert!(matches!(parse_number_input("NaN"), Err(NumberError::NonFinite(_))));
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite(1.0).unwrap(), 1.0);
        assert!(ensure_finite(f64::NAN).is_err());
        assert!(ensure_finite(f64::INFINITY).is_err());
        assert!(ensure_finite(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(1.609344, 2), "1.61");
        assert_eq!(format_fixed(32.0, 2), "32.00");
        assert_eq!(format_fixed(2.4, 0), "2");
        assert_eq!(format_fixed(-40.0, 1), "-40.0");
    }
}
