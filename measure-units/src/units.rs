//! Unit tables for the multiplicative categories
//!
//! Order is significant: it is the order callers present units in, and the
//! first two entries are the default from/to pair.

use crate::unit::LinearUnit;

/// Length, base unit meters
pub static LENGTH_UNITS: [LinearUnit; 6] = [
    LinearUnit::new("meters", 1.0),
    LinearUnit::new("kilometers", 1000.0),
    LinearUnit::new("miles", 1609.34),
    LinearUnit::new("yards", 0.9144),
    LinearUnit::new("feet", 0.3048),
    LinearUnit::new("inches", 0.0254),
];

/// Weight, base unit grams
pub static WEIGHT_UNITS: [LinearUnit; 4] = [
    LinearUnit::new("grams", 1.0),
    LinearUnit::new("kilograms", 1000.0),
    LinearUnit::new("pounds", 453.592),
    LinearUnit::new("ounces", 28.3495),
];

/// Volume, base unit liters
pub static VOLUME_UNITS: [LinearUnit; 4] = [
    LinearUnit::new("liters", 1.0),
    LinearUnit::new("milliliters", 0.001),
    LinearUnit::new("gallons", 3.78541),
    // 0.24 L is the historical value; a US cup is nearer 0.2366 L
    LinearUnit::new("cups", 0.24),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn tables() -> [&'static [LinearUnit]; 3] {
        [&LENGTH_UNITS, &WEIGHT_UNITS, &VOLUME_UNITS]
    }

    #[test]
    fn test_exactly_one_base_unit() {
        for table in tables() {
            assert_eq!(table.iter().filter(|u| u.is_base()).count(), 1);
        }
    }

    #[test]
    fn test_factors_positive_and_finite() {
        for table in tables() {
            for unit in table {
                assert!(unit.factor > 0.0 && unit.factor.is_finite(), "{}", unit.name);
            }
        }
    }

    #[test]
    fn test_names_unique() {
        for table in tables() {
            let names: HashSet<&str> = table.iter().map(|u| u.name).collect();
            assert_eq!(names.len(), table.len());
        }
    }

    #[test]
    fn test_cups_factor_preserved() {
        let cups = VOLUME_UNITS.iter().find(|u| u.name == "cups").unwrap();
        assert_eq!(cups.factor, 0.24);
    }
}
