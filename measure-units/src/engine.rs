//! Conversion engine
//!
//! Stateless operations over the constant unit tables. Every lookup is
//! scoped to a category; a unit name means nothing outside its own.

use measure_core::{ensure_finite, format_fixed};
use crate::unit::{ConversionError, LinearUnit};
use crate::{Category, TemperatureUnit};

/// Categories in declared order
pub fn categories() -> &'static [Category] {
    &Category::ALL
}

/// Units of `category` in declared order
pub fn list_units(category: Category) -> Vec<&'static str> {
    match category.table() {
        Some(table) => table.iter().map(|u| u.name).collect(),
        None => TemperatureUnit::ALL.iter().map(|u| u.name()).collect(),
    }
}

/// Resolve a category by name, then list its units
pub fn list_units_named(category: &str) -> Result<Vec<&'static str>, ConversionError> {
    let category: Category = category.parse()?;
    Ok(list_units(category))
}

/// The initial from/to selection: the first two declared units
pub fn default_units(category: Category) -> Option<(&'static str, &'static str)> {
    match list_units(category).as_slice() {
        [from, to, ..] => Some((*from, *to)),
        _ => None,
    }
}

/// Base units per one `unit`; `None` for Temperature or an unknown unit
pub fn factor(category: Category, unit: &str) -> Option<f64> {
    let name = resolve_unit(category, unit).ok()?;
    category.table()?
        .iter()
        .find(|u| u.name == name)
        .map(|u| u.factor)
}

/// The unit with factor 1; `None` for Temperature
pub fn base_unit(category: Category) -> Option<&'static str> {
    category.table()?
        .iter()
        .find(|u| u.is_base())
        .map(|u| u.name)
}

/// Map a caller-supplied name to the canonical declared name.
///
/// Exact match wins; otherwise the first ASCII case-insensitive match.
pub fn resolve_unit(category: Category, name: &str) -> Result<&'static str, ConversionError> {
    let wanted = name.trim();
    let units = list_units(category);

    units.iter()
        .copied()
        .find(|u| *u == wanted)
        .or_else(|| units.iter().copied().find(|u| u.eq_ignore_ascii_case(wanted)))
        .ok_or_else(|| ConversionError::UnknownUnit {
            unit: name.to_string(),
            category,
        })
}

/// Convert `value` from one unit of `category` to another.
///
/// Linear categories change basis through the base unit; Temperature
/// dispatches to the directed formula for the pair. Converting a unit to
/// itself returns `value` untouched.
pub fn convert(category: Category, from: &str, to: &str, value: f64) -> Result<f64, ConversionError> {
    let from = resolve_unit(category, from)?;
    let to = resolve_unit(category, to)?;
    let value = ensure_finite(value)?;

    if from == to {
        return Ok(value);
    }

    let result = match category.table() {
        Some(table) => {
            let source = linear_unit(table, category, from)?;
            let target = linear_unit(table, category, to)?;
            source.convert_to(value, target)
        }
        None => {
            let source = temperature_unit(category, from)?;
            let target = temperature_unit(category, to)?;
            source.convert_to(value, target)
        }
    };

    // Overflow at the extremes of f64
    ensure_finite(result).map_err(ConversionError::from)
}

/// `convert` with the category given by name
pub fn convert_named(category: &str, from: &str, to: &str, value: f64) -> Result<f64, ConversionError> {
    let category: Category = category.parse()?;
    convert(category, from, to, value)
}

/// Display form: the value at fixed decimals followed by the unit name
pub fn format_result(value: f64, unit: &str, decimals: usize) -> String {
    format!("{} {}", format_fixed(value, decimals), unit)
}

fn linear_unit(
    table: &'static [LinearUnit],
    category: Category,
    name: &str,
) -> Result<&'static LinearUnit, ConversionError> {
    table.iter()
        .find(|u| u.name == name)
        .ok_or_else(|| ConversionError::UnknownUnit { unit: name.to_string(), category })
}

fn temperature_unit(category: Category, name: &str) -> Result<TemperatureUnit, ConversionError> {
    TemperatureUnit::from_name(name)
        .ok_or_else(|| ConversionError::UnknownUnit { unit: name.to_string(), category })
}
