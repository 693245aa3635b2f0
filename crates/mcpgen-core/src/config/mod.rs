//! Configuration types for mcpgen.
//!
//! Configuration is read once from `mcpgen.yaml` (optional) and passed by
//! reference to every generator. Nothing downstream reads environment
//! variables or global state.
//!
//! # Configuration File
//!
//! ```yaml
//! project: ProAgendify
//! version: 1.0.0
//! registry: mcp.json
//! outputs:
//!   schema: backend/prisma/schema.prisma
//! ```
//!
//! Relative paths are resolved against the directory holding the
//! configuration file.

pub mod deployment;
pub mod outputs;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use deployment::{DeploymentConfig, FrontendConfig, HostingTarget, DatabaseTarget};
pub use outputs::{DatasourceConfig, OutputsConfig};

/// Conventional configuration file name.
pub const CONFIG_FILE_NAME: &str = "mcpgen.yaml";

/// Complete mcpgen configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpgenConfig {
    /// Project name, used as the documentation title.
    #[serde(default = "default_project")]
    pub project: String,

    /// Project version.
    #[serde(default = "default_version")]
    pub version: String,

    /// Path to the model registry.
    #[serde(default = "default_registry")]
    pub registry: PathBuf,

    /// Generated artifact paths.
    #[serde(default)]
    pub outputs: OutputsConfig,

    /// Schema datasource settings.
    #[serde(default)]
    pub datasource: DatasourceConfig,

    /// Static frontend inventory.
    #[serde(default)]
    pub frontend: FrontendConfig,

    /// Deployment metadata.
    #[serde(default)]
    pub deployment: DeploymentConfig,

    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Default for McpgenConfig {
    fn default() -> Self {
        Self {
            project: default_project(),
            version: default_version(),
            registry: default_registry(),
            outputs: OutputsConfig::default(),
            datasource: DatasourceConfig::default(),
            frontend: FrontendConfig::default(),
            deployment: DeploymentConfig::default(),
            base_dir: PathBuf::from("."),
        }
    }
}

fn default_project() -> String {
    "ProAgendify".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_registry() -> PathBuf {
    PathBuf::from("mcp.json")
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl McpgenConfig {
    /// Load configuration from a YAML file. `base_dir` becomes the file's
    /// parent directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&content)?;
        config.base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults rooted at
    /// the directory the file would live in.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            tracing::debug!(path = %path.display(), "Loading configuration");
            return Self::from_file(path);
        }

        tracing::debug!(path = %path.display(), "No configuration file, using defaults");
        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self::default().with_base_dir(base_dir))
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.project.trim().is_empty() {
            return Err(ConfigError::Config("project must not be empty".to_string()));
        }
        self.outputs.validate(&self.registry)?;
        Ok(())
    }

    /// Resolve a configured path against `base_dir`.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn registry_path(&self) -> PathBuf {
        self.resolve(&self.registry)
    }
}
