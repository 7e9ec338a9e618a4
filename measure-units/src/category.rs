//! Conversion categories

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::unit::{ConversionError, LinearUnit};
use crate::units::{LENGTH_UNITS, VOLUME_UNITS, WEIGHT_UNITS};

/// A conversion domain with its own, closed set of units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Length,
    Weight,
    Volume,
    Temperature,
}

impl Category {
    /// All categories in declared order
    pub const ALL: [Category; 4] = [
        Category::Length,
        Category::Weight,
        Category::Volume,
        Category::Temperature,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Weight => "Weight",
            Category::Volume => "Volume",
            Category::Temperature => "Temperature",
        }
    }

    /// Scale-factor table for multiplicative categories, `None` for Temperature
    pub fn table(&self) -> Option<&'static [LinearUnit]> {
        match self {
            Category::Length => Some(&LENGTH_UNITS),
            Category::Weight => Some(&WEIGHT_UNITS),
            Category::Volume => Some(&VOLUME_UNITS),
            Category::Temperature => None,
        }
    }

    pub fn is_linear(&self) -> bool {
        self.table().is_some()
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.name()).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL.iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConversionError::UnknownCategory(s.to_string()))
    }
}
