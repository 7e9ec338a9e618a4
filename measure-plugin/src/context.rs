//! Evaluation Context

use crate::PluginRegistry;
use measure_core::DEFAULT_DECIMALS;
use std::sync::Arc;

/// Evaluation context passed to plugins
pub struct EvalContext {
    /// Decimals used when a plugin renders a result as text
    pub decimals: usize,
    pub registry: Arc<PluginRegistry>,
}

impl EvalContext {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            decimals: DEFAULT_DECIMALS,
            registry,
        }
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_two_decimals() {
        let ctx = EvalContext::new(Arc::new(PluginRegistry::new()));
        assert_eq!(ctx.decimals, 2);
        assert_eq!(ctx.with_decimals(4).decimals, 4);
    }
}
