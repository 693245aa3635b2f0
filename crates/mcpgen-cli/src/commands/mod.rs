//! CLI command implementations for mcpgen.

pub mod add_model;
pub mod check;
pub mod sync;

use anyhow::{Context, Result};
use mcpgen_core::McpgenConfig;
use std::path::Path;

/// Load the configuration file, or defaults rooted next to it.
pub fn load_config(config_path: &Path) -> Result<McpgenConfig> {
    McpgenConfig::load_or_default(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))
}
