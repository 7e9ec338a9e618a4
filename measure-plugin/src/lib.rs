//! Measure Plugin System
//!
//! Every operation a front-end can invoke is a `FunctionPlugin`: a named,
//! self-describing pure function registered in a `PluginRegistry` and
//! called with a slice of `Value` arguments.

mod traits;
mod registry;
mod context;

pub use traits::{FunctionPlugin, FunctionMeta, ArgMeta};
pub use registry::PluginRegistry;
pub use context::EvalContext;

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{FunctionPlugin, FunctionMeta, ArgMeta, PluginRegistry, EvalContext};
    pub use measure_core::prelude::*;
}
