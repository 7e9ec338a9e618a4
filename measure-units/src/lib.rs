//! Measure Units - Category-scoped unit conversion
//!
//! Four fixed categories, each with its own closed set of units:
//! - Length (meters, kilometers, miles, yards, feet, inches)
//! - Weight (grams, kilograms, pounds, ounces)
//! - Volume (liters, milliliters, gallons, cups)
//! - Temperature (Celsius, Fahrenheit, Kelvin)
//!
//! Length, Weight and Volume are scale-factor tables over a base unit.
//! Temperature uses one linear formula per directed pair of scales.

mod category;
mod unit;
mod units;
mod temperature;
mod engine;
mod helpers;
mod convert;

pub use category::Category;
pub use unit::{LinearUnit, ConversionError};
pub use temperature::TemperatureUnit;
pub use units::{LENGTH_UNITS, WEIGHT_UNITS, VOLUME_UNITS};
pub use engine::{
    categories, list_units, list_units_named, default_units, factor, base_unit,
    resolve_unit, convert, convert_named, format_result,
};

use measure_plugin::PluginRegistry;

/// Load unit functions into registry
pub fn load_units_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        // Conversion (2 functions)
        .with_function(convert::Convert)
        .with_function(convert::ConvertDisplay)

        // Inspection (4 functions)
        .with_function(convert::ListUnits)
        .with_function(convert::ListCategories)
        .with_function(convert::DefaultUnits)
        .with_function(convert::BaseUnit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_units_library() {
        let registry = load_units_library(PluginRegistry::new());

        assert!(registry.get_function("convert").is_some());
        assert!(registry.get_function("convert_display").is_some());
        assert!(registry.get_function("list_units").is_some());
        assert!(registry.get_function("list_categories").is_some());
        assert!(registry.get_function("default_units").is_some());
        assert!(registry.get_function("base_unit").is_some());
    }
}
