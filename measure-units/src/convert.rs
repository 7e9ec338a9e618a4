//! Unit conversion functions for Measure

use std::collections::HashMap;
use measure_plugin::prelude::*;
use crate::engine;
use crate::helpers::{extract_category, extract_number, extract_optional_count, extract_text};
use crate::Category;

/// Shared by `convert` and `convert_display`: arguments 0..4
fn convert_args(args: &[Value], func: &str) -> Result<(f64, &'static str), MeasureError> {
    if args.len() < 4 {
        return Err(MeasureError::arg_count(func, 4, args.len()));
    }

    let category = extract_category(&args[1], func, "category")?;
    let from = extract_text(&args[2], func, "from_unit")?;
    let to = extract_text(&args[3], func, "to_unit")?;

    // Units are checked before the value, source unit first
    let from = engine::resolve_unit(category, from)?;
    let to = engine::resolve_unit(category, to)?;
    let value = extract_number(&args[0], func, "value")?;

    let result = engine::convert(category, from, to, value)?;
    Ok((result, to))
}

fn text_list(items: impl IntoIterator<Item = &'static str>) -> Value {
    Value::List(items.into_iter().map(Value::from).collect())
}

// ============ convert ============

pub struct Convert;

static CONVERT_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("value", "Number", "Value to convert (numeric text is accepted)"),
    ArgMeta::required("category", "Text", "Length, Weight, Volume or Temperature"),
    ArgMeta::required("from_unit", "Text", "Source unit (e.g., \"miles\")"),
    ArgMeta::required("to_unit", "Text", "Target unit (e.g., \"kilometers\")"),
];

static CONVERT_EXAMPLES: [&str; 3] = [
    "convert(1, \"Length\", \"miles\", \"kilometers\") → 1.60934",
    "convert(0, \"Temperature\", \"Celsius\", \"Fahrenheit\") → 32",
    "convert(2, \"Volume\", \"gallons\", \"liters\") → 7.57082",
];

static CONVERT_RELATED: [&str; 2] = ["convert_display", "list_units"];

impl FunctionPlugin for Convert {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert",
            description: "Convert a value between two units of the same category",
            usage: "convert(value, category, from_unit, to_unit)",
            args: &CONVERT_ARGS,
            returns: "Number",
            examples: &CONVERT_EXAMPLES,
            category: "units",
            related: &CONVERT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match convert_args(args, "convert") {
            Ok((result, _)) => Value::Number(result),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ convert_display ============

pub struct ConvertDisplay;

static CONVERT_DISPLAY_ARGS: [ArgMeta; 5] = [
    ArgMeta::required("value", "Number", "Value to convert (numeric text is accepted)"),
    ArgMeta::required("category", "Text", "Length, Weight, Volume or Temperature"),
    ArgMeta::required("from_unit", "Text", "Source unit"),
    ArgMeta::required("to_unit", "Text", "Target unit"),
    ArgMeta::optional("decimals", "Number", "Digits after the decimal point", "2"),
];

static CONVERT_DISPLAY_EXAMPLES: [&str; 2] = [
    "convert_display(1, \"Length\", \"miles\", \"kilometers\") → \"1.61 kilometers\"",
    "convert_display(\"98.6\", \"Temperature\", \"Fahrenheit\", \"Celsius\", 1) → \"37.0 Celsius\"",
];

static CONVERT_DISPLAY_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for ConvertDisplay {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert_display",
            description: "Convert and render the result with its unit for display",
            usage: "convert_display(value, category, from_unit, to_unit, [decimals])",
            args: &CONVERT_DISPLAY_ARGS,
            returns: "Text",
            examples: &CONVERT_DISPLAY_EXAMPLES,
            category: "units",
            related: &CONVERT_DISPLAY_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        let (result, unit) = match convert_args(args, "convert_display") {
            Ok(converted) => converted,
            Err(e) => return Value::Error(e),
        };

        match extract_optional_count(args, 4, "convert_display", "decimals") {
            Ok(d) => Value::Text(engine::format_result(result, unit, d.unwrap_or(ctx.decimals))),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ list_units ============

pub struct ListUnits;

static LIST_UNITS_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("category", "Text", "Length, Weight, Volume or Temperature"),
];

static LIST_UNITS_EXAMPLES: [&str; 2] = [
    "list_units(\"Weight\") → [grams, kilograms, pounds, ounces]",
    "list_units(\"Temperature\") → [Celsius, Fahrenheit, Kelvin]",
];

static LIST_UNITS_RELATED: [&str; 2] = ["list_categories", "default_units"];

impl FunctionPlugin for ListUnits {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "list_units",
            description: "List the units of a category in display order",
            usage: "list_units(category)",
            args: &LIST_UNITS_ARGS,
            returns: "List",
            examples: &LIST_UNITS_EXAMPLES,
            category: "units",
            related: &LIST_UNITS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.is_empty() {
            return Value::Error(MeasureError::arg_count("list_units", 1, 0));
        }

        match extract_category(&args[0], "list_units", "category") {
            Ok(category) => text_list(engine::list_units(category)),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ list_categories ============

pub struct ListCategories;

static LIST_CATEGORIES_EXAMPLES: [&str; 1] = [
    "list_categories() → [Length, Weight, Volume, Temperature]",
];

static LIST_CATEGORIES_RELATED: [&str; 1] = ["list_units"];

impl FunctionPlugin for ListCategories {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "list_categories",
            description: "List the conversion categories",
            usage: "list_categories()",
            args: &[],
            returns: "List",
            examples: &LIST_CATEGORIES_EXAMPLES,
            category: "units",
            related: &LIST_CATEGORIES_RELATED,
        }
    }

    fn call(&self, _args: &[Value], _ctx: &EvalContext) -> Value {
        text_list(engine::categories().iter().map(Category::name))
    }
}

// ============ default_units ============

pub struct DefaultUnits;

static DEFAULT_UNITS_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("category", "Text", "Length, Weight, Volume or Temperature"),
];

static DEFAULT_UNITS_EXAMPLES: [&str; 1] = [
    "default_units(\"Length\") → {from: meters, to: kilometers}",
];

static DEFAULT_UNITS_RELATED: [&str; 1] = ["list_units"];

impl FunctionPlugin for DefaultUnits {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "default_units",
            description: "Initial from/to selection for a category",
            usage: "default_units(category)",
            args: &DEFAULT_UNITS_ARGS,
            returns: "Object {from: Text, to: Text}",
            examples: &DEFAULT_UNITS_EXAMPLES,
            category: "units",
            related: &DEFAULT_UNITS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.is_empty() {
            return Value::Error(MeasureError::arg_count("default_units", 1, 0));
        }

        let category = match extract_category(&args[0], "default_units", "category") {
            Ok(c) => c,
            Err(e) => return Value::Error(e),
        };

        match engine::default_units(category) {
            Some((from, to)) => {
                let mut obj = HashMap::new();
                obj.insert("from".to_string(), Value::from(from));
                obj.insert("to".to_string(), Value::from(to));
                Value::Object(obj)
            }
            None => Value::Error(MeasureError::internal(format!(
                "{} declares fewer than two units", category
            ))),
        }
    }
}

// ============ base_unit ============

pub struct BaseUnit;

static BASE_UNIT_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("category", "Text", "Length, Weight or Volume"),
];

static BASE_UNIT_EXAMPLES: [&str; 2] = [
    "base_unit(\"Length\") → \"meters\"",
    "base_unit(\"Volume\") → \"liters\"",
];

static BASE_UNIT_RELATED: [&str; 1] = ["list_units"];

impl FunctionPlugin for BaseUnit {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "base_unit",
            description: "The unit every other unit of a linear category is scaled against",
            usage: "base_unit(category)",
            args: &BASE_UNIT_ARGS,
            returns: "Text",
            examples: &BASE_UNIT_EXAMPLES,
            category: "units",
            related: &BASE_UNIT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.is_empty() {
            return Value::Error(MeasureError::arg_count("base_unit", 1, 0));
        }

        let category = match extract_category(&args[0], "base_unit", "category") {
            Ok(c) => c,
            Err(e) => return Value::Error(e),
        };

        match engine::base_unit(category) {
            Some(unit) => Value::from(unit),
            None => Value::Error(MeasureError::domain_error(format!(
                "{} scales are offset, not scaled; there is no base unit",
                category
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn eval_ctx() -> EvalContext {
        EvalContext::new(Arc::new(PluginRegistry::new()))
    }

    fn args(items: &[Value]) -> Vec<Value> {
        items.to_vec()
    }

    #[test]
    fn test_convert_length() {
        let result = Convert.call(&args(&[
            Value::Number(5.0),
            Value::from("Length"),
            Value::from("kilometers"),
            Value::from("meters"),
        ]), &eval_ctx());
        assert_eq!(result.as_number(), Some(5000.0));
    }

    #[test]
    fn test_convert_accepts_numeric_text() {
        let result = Convert.call(&args(&[
            Value::from("100"),
            Value::from("temperature"),
            Value::from("Celsius"),
            Value::from("Kelvin"),
        ]), &eval_ctx());
        assert_eq!(result.as_number(), Some(373.15));
    }

    #[test]
    fn test_convert_invalid_text_value() {
        let result = Convert.call(&args(&[
            Value::from("abc"),
            Value::from("Length"),
            Value::from("meters"),
            Value::from("feet"),
        ]), &eval_ctx());
        let err = result.as_error().unwrap();
        assert!(err.is_code(codes::INVALID_VALUE));
        assert_eq!(err.suggestion.as_deref(), Some("Please enter a valid number."));
    }

    #[test]
    fn test_convert_unknown_unit() {
        let result = Convert.call(&args(&[
            Value::Number(1.0),
            Value::from("Weight"),
            Value::from("stones"),
            Value::from("grams"),
        ]), &eval_ctx());
        let err = result.as_error().unwrap();
        assert!(err.is_code(codes::UNKNOWN_UNIT));
        assert!(err.suggestion.as_deref().unwrap().contains("grams, kilograms, pounds, ounces"));
    }

    #[test]
    fn test_convert_bad_unit_reported_before_bad_value() {
        let result = Convert.call(&args(&[
            Value::from("abc"),
            Value::from("Length"),
            Value::from("parsecs"),
            Value::from("meters"),
        ]), &eval_ctx());
        let err = result.as_error().unwrap();
        assert!(err.is_code(codes::UNKNOWN_UNIT));
        assert!(err.message.contains("parsecs"));
    }

    #[test]
    fn test_convert_source_unit_reported_first() {
        let result = Convert.call(&args(&[
            Value::Number(1.0),
            Value::from("Length"),
            Value::from("parsecs"),
            Value::from("furlongs"),
        ]), &eval_ctx());
        let err = result.as_error().unwrap();
        assert!(err.is_code(codes::UNKNOWN_UNIT));
        assert!(err.message.contains("parsecs"));
        assert!(!err.message.contains("furlongs"));

        let engine_err = engine::convert(Category::Length, "parsecs", "furlongs", 1.0).unwrap_err();
        assert_eq!(MeasureError::from(engine_err).message, err.message);
    }

    #[test]
    fn test_convert_unknown_category() {
        let result = Convert.call(&args(&[
            Value::Number(1.0),
            Value::from("Energy"),
            Value::from("joules"),
            Value::from("calories"),
        ]), &eval_ctx());
        assert!(result.as_error().unwrap().is_code(codes::UNKNOWN_CATEGORY));
    }

    #[test]
    fn test_convert_arg_count() {
        let result = Convert.call(&args(&[Value::Number(1.0)]), &eval_ctx());
        assert!(result.as_error().unwrap().is_code(codes::ARG_COUNT));
    }

    #[test]
    fn test_convert_arg_type() {
        let result = Convert.call(&args(&[
            Value::Number(1.0),
            Value::from("Length"),
            Value::Number(3.0),
            Value::from("meters"),
        ]), &eval_ctx());
        assert!(result.as_error().unwrap().is_code(codes::ARG_TYPE));
    }

    #[test]
    fn test_convert_display_default_decimals() {
        let result = ConvertDisplay.call(&args(&[
            Value::Number(1.0),
            Value::from("Length"),
            Value::from("miles"),
            Value::from("kilometers"),
        ]), &eval_ctx());
        assert_eq!(result.as_text(), Some("1.61 kilometers"));
    }

    #[test]
    fn test_convert_display_uses_canonical_unit_name() {
        let result = ConvertDisplay.call(&args(&[
            Value::Number(0.0),
            Value::from("Temperature"),
            Value::from("celsius"),
            Value::from("fahrenheit"),
        ]), &eval_ctx());
        assert_eq!(result.as_text(), Some("32.00 Fahrenheit"));
    }

    #[test]
    fn test_convert_display_explicit_and_context_decimals() {
        let call = |extra: Option<Value>, ctx: &EvalContext| {
            let mut a = vec![
                Value::Number(2.0),
                Value::from("Volume"),
                Value::from("gallons"),
                Value::from("liters"),
            ];
            a.extend(extra);
            ConvertDisplay.call(&a, ctx)
        };

        assert_eq!(call(Some(Value::Number(3.0)), &eval_ctx()).as_text(), Some("7.571 liters"));
        assert_eq!(call(None, &eval_ctx().with_decimals(1)).as_text(), Some("7.6 liters"));
    }

    #[test]
    fn test_list_units() {
        let result = ListUnits.call(&[Value::from("Volume")], &eval_ctx());
        let names: Vec<&str> = result.as_list().unwrap().iter().filter_map(Value::as_text).collect();
        assert_eq!(names, vec!["liters", "milliliters", "gallons", "cups"]);
    }

    #[test]
    fn test_list_units_unknown_category() {
        let result = ListUnits.call(&[Value::from("Area")], &eval_ctx());
        assert!(result.as_error().unwrap().is_code(codes::UNKNOWN_CATEGORY));
    }

    #[test]
    fn test_list_categories() {
        let result = ListCategories.call(&[], &eval_ctx());
        assert_eq!(result.to_string(), "[Length, Weight, Volume, Temperature]");
    }

    #[test]
    fn test_default_units() {
        let result = DefaultUnits.call(&[Value::from("Weight")], &eval_ctx());
        let obj = result.as_object().unwrap();
        assert_eq!(obj["from"].as_text(), Some("grams"));
        assert_eq!(obj["to"].as_text(), Some("kilograms"));
    }

    #[test]
    fn test_base_unit() {
        assert_eq!(BaseUnit.call(&[Value::from("Length")], &eval_ctx()).as_text(), Some("meters"));
        let result = BaseUnit.call(&[Value::from("Temperature")], &eval_ctx());
        assert!(result.as_error().unwrap().is_code(codes::DOMAIN_ERROR));
    }
}
