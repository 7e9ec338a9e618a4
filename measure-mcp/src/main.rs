//! Measure MCP Server
//!
//! MCP server (protocol revision 2025-11-25) over stdio.
//!
//! Tools:
//! - convert: Convert a value between two units of a category
//! - list_units: List a category's units in display order
//! - list_categories: List the conversion categories
//! - help: Get documentation for a function
//! - list_functions: List available functions
//!
//! Logs go to stderr; stdout carries only protocol messages.

mod config;
mod server;

use std::io;
use std::process::ExitCode;
use measure_plugin::PluginRegistry;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{ServerConfig, DEFAULT_LOG_FILTER};
use crate::server::{Server, PROTOCOL_VERSION};

fn init_logging(config: &ServerConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> ExitCode {
    let config = ServerConfig::from_env();
    init_logging(&config);
    config.report();

    let registry = measure_units::load_units_library(PluginRegistry::new());
    let server = Server::new(registry, config.decimals);

    info!(version = env!("CARGO_PKG_VERSION"), protocol = PROTOCOL_VERSION, "Measure MCP server started");

    let stdin = io::stdin();
    let stdout = io::stdout();
    match server.serve(stdin.lock(), stdout.lock()) {
        Ok(()) => {
            info!("server shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "i/o failure on stdio");
            ExitCode::FAILURE
        }
    }
}
