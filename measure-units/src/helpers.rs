//! Argument extraction shared by the unit plugins

use measure_core::{MeasureError, Value};
use crate::Category;

/// Extract a Number. Text is parsed the way a typed entry field would be.
pub fn extract_number(value: &Value, func: &str, arg: &str) -> Result<f64, MeasureError> {
    match value {
        Value::Number(_) | Value::Text(_) => match value.to_number() {
            Value::Number(n) => Ok(n),
            Value::Error(e) => Err(e),
            other => Err(MeasureError::arg_type(func, arg, "Number", other.type_name())),
        },
        Value::Error(e) => Err(e.clone()),
        other => Err(MeasureError::arg_type(func, arg, "Number", other.type_name())),
    }
}

/// Extract a Text string
pub fn extract_text<'a>(value: &'a Value, func: &str, arg: &str) -> Result<&'a str, MeasureError> {
    match value {
        Value::Text(s) => Ok(s),
        Value::Error(e) => Err(e.clone()),
        other => Err(MeasureError::arg_type(func, arg, "Text", other.type_name())),
    }
}

/// Extract a category name and resolve it
pub fn extract_category(value: &Value, func: &str, arg: &str) -> Result<Category, MeasureError> {
    let name = extract_text(value, func, arg)?;
    name.parse::<Category>().map_err(MeasureError::from)
}

/// Extract an optional non-negative integer (e.g. decimals), `None` when absent or Null
pub fn extract_optional_count(args: &[Value], index: usize, func: &str, arg: &str) -> Result<Option<usize>, MeasureError> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => {
            let n = extract_number(v, func, arg)?;
            if n < 0.0 || n.fract() != 0.0 || n > 17.0 {
                return Err(MeasureError::domain_error(format!(
                    "{}(): {} must be a whole number between 0 and 17, got {}",
                    func, arg, n
                )));
            }
            Ok(Some(n as usize))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use measure_core::codes;

    #[test]
    fn test_extract_number() {
        assert_eq!(extract_number(&Value::Number(4.0), "f", "x").unwrap(), 4.0);
        assert_eq!(extract_number(&Value::from(" 2.5 "), "f", "x").unwrap(), 2.5);
    }

    #[test]
    fn test_extract_number_errors() {
        let err = extract_number(&Value::from("ten"), "f", "x").unwrap_err();
        assert!(err.is_code(codes::INVALID_VALUE));

        let err = extract_number(&Value::Bool(true), "f", "x").unwrap_err();
        assert!(err.is_code(codes::ARG_TYPE));
    }

    #[test]
    fn test_extract_text() {
        assert_eq!(extract_text(&Value::from("miles"), "f", "unit").unwrap(), "miles");
        assert!(extract_text(&Value::Number(1.0), "f", "unit").unwrap_err().is_code(codes::ARG_TYPE));
    }

    #[test]
    fn test_extract_category() {
        assert_eq!(extract_category(&Value::from("volume"), "f", "c").unwrap(), Category::Volume);
        let err = extract_category(&Value::from("Time"), "f", "c").unwrap_err();
        assert!(err.is_code(codes::UNKNOWN_CATEGORY));
    }

    #[test]
    fn test_extract_optional_count() {
        let args = [Value::Null, Value::Number(3.0), Value::Number(2.5)];
        assert_eq!(extract_optional_count(&args, 0, "f", "d").unwrap(), None);
        assert_eq!(extract_optional_count(&args, 1, "f", "d").unwrap(), Some(3));
        assert_eq!(extract_optional_count(&args, 5, "f", "d").unwrap(), None);
        assert!(extract_optional_count(&args, 2, "f", "d").unwrap_err().is_code(codes::DOMAIN_ERROR));
    }
}
