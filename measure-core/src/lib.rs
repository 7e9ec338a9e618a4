//! Measure Core - Fundamental types
//!
//! This crate provides the core types used throughout Measure:
//! - `Value`: Runtime values (numbers, text, objects, errors)
//! - `MeasureError`: Structured errors with codes and suggestions
//! - numeric input parsing and fixed-decimal formatting

mod number;
mod value;
mod error;

pub use number::{NumberError, parse_number_input, ensure_finite, format_fixed, DEFAULT_DECIMALS};
pub use value::Value;
pub use error::{MeasureError, Severity, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Value, MeasureError, Severity};
    pub use crate::error::codes;
}
