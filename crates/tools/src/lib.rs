//! Shared plumbing for the developer binaries.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use undercroft_core::WorldConfig;

/// Logs to stderr, filtered by `RUST_LOG` and defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

pub fn load_config(path: Option<&Path>) -> Result<WorldConfig> {
    match path {
        Some(path) => WorldConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display())),
        None => Ok(WorldConfig::default()),
    }
}
