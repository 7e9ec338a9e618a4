//! Unit representation and conversion errors

use std::fmt;
use serde::Serialize;
use thiserror::Error;
use measure_core::{MeasureError, NumberError};
use crate::Category;

/// A unit of a multiplicative category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearUnit {
    /// Unit name as presented to callers (e.g. "kilometers")
    pub name: &'static str,
    /// How many base units make up one of this unit
    pub factor: f64,
}

impl LinearUnit {
    pub const fn new(name: &'static str, factor: f64) -> Self {
        LinearUnit { name, factor }
    }

    pub fn is_base(&self) -> bool {
        self.factor == 1.0
    }

    /// value in this unit -> value in base units
    pub fn to_base(&self, value: f64) -> f64 {
        value * self.factor
    }

    /// value in base units -> value in this unit
    pub fn from_base(&self, value: f64) -> f64 {
        value / self.factor
    }

    /// Change of basis through the base unit.
    ///
    /// Falls back to the ratio of the two factors when the intermediate
    /// base value overflows, so only a result that is itself out of range
    /// comes back non-finite.
    pub fn convert_to(&self, value: f64, target: &LinearUnit) -> f64 {
        let base = self.to_base(value);
        if base.is_finite() {
            target.from_base(base)
        } else {
            value * (self.factor / target.factor)
        }
    }
}

impl fmt::Display for LinearUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Errors that can occur during unit conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown unit '{unit}' for {category}")]
    UnknownUnit { unit: String, category: Category },

    #[error("invalid value: {0}")]
    InvalidValue(#[from] NumberError),
}

impl From<ConversionError> for MeasureError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::UnknownCategory(name) => {
                MeasureError::unknown_category(&name, &Category::names())
            }
            ConversionError::UnknownUnit { unit, category } => {
                MeasureError::unknown_unit(&unit, category.name(), &crate::list_units(category))
            }
            ConversionError::InvalidValue(e) => MeasureError::from(e),
        }
    }
}
