//! Server configuration from environment variables

use std::env;
use measure_core::DEFAULT_DECIMALS;
use tracing::{info, warn};

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Largest precision `f64` formatting can meaningfully show
const MAX_DECIMALS: usize = 17;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// `RUST_LOG`
    pub log_filter: String,
    /// `MEASURE_DECIMALS`: digits shown in rendered results
    pub decimals: usize,
    /// Raw `MEASURE_DECIMALS` value that was rejected, kept to report once logging is up
    rejected_decimals: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_filter = lookup("RUST_LOG")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let (decimals, rejected_decimals) = match lookup("MEASURE_DECIMALS") {
            None => (DEFAULT_DECIMALS, None),
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(d) if d <= MAX_DECIMALS => (d, None),
                _ => (DEFAULT_DECIMALS, Some(raw)),
            },
        };

        Self { log_filter, decimals, rejected_decimals }
    }

    /// Log the effective configuration
    pub fn report(&self) {
        if let Some(ref raw) = self.rejected_decimals {
            warn!(
                value = %raw,
                fallback = DEFAULT_DECIMALS,
                "MEASURE_DECIMALS must be a whole number from 0 to {}", MAX_DECIMALS
            );
        }
        info!(decimals = self.decimals, log_filter = %self.log_filter, "configuration loaded");
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.decimals, 2);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_reads_values() {
        let config = config_from(&[("RUST_LOG", "debug"), ("MEASURE_DECIMALS", " 4 ")]);
        assert_eq!(config.decimals, 4);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_invalid_decimals_fall_back() {
        for bad in ["-1", "two", "99"] {
            let config = config_from(&[("MEASURE_DECIMALS", bad)]);
            assert_eq!(config.decimals, 2);
            assert_eq!(config.rejected_decimals.as_deref(), Some(bad));
        }
    }

    #[test]
    fn test_blank_log_filter_uses_default() {
        assert_eq!(config_from(&[("RUST_LOG", "  ")]).log_filter, "info");
    }
}
