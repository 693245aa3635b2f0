//! Generated artifact locations and schema datasource settings.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use super::ConfigError;

/// Where each generated artifact is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputsConfig {
    /// Project descriptor (JSON).
    #[serde(default = "default_descriptor")]
    pub descriptor: PathBuf,

    /// Relational schema (Prisma).
    #[serde(default = "default_schema")]
    pub schema: PathBuf,

    /// Client type definitions (TypeScript).
    #[serde(default = "default_types")]
    pub types: PathBuf,

    /// Project documentation (Markdown).
    #[serde(default = "default_docs")]
    pub docs: PathBuf,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            descriptor: default_descriptor(),
            schema: default_schema(),
            types: default_types(),
            docs: default_docs(),
        }
    }
}

impl OutputsConfig {
    /// Every output needs its own file, and none may overwrite `registry`.
    pub(super) fn validate(&self, registry: &Path) -> Result<(), ConfigError> {
        let registry = normalize(registry);
        let paths = [&self.descriptor, &self.schema, &self.types, &self.docs];
        let mut seen: Vec<PathBuf> = Vec::with_capacity(paths.len());
        for path in paths {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Config("output paths must not be empty".to_string()));
            }
            let normalized = normalize(path);
            if normalized == registry {
                return Err(ConfigError::Config(format!(
                    "output path {} would overwrite the model registry",
                    path.display()
                )));
            }
            if seen.contains(&normalized) {
                return Err(ConfigError::Config(format!(
                    "output path {} is used by more than one artifact",
                    path.display()
                )));
            }
            seen.push(normalized);
        }
        Ok(())
    }
}

/// Drop `.` components so `./mcp-full.json` and `mcp-full.json` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn default_descriptor() -> PathBuf {
    PathBuf::from("mcp-full.json")
}

fn default_schema() -> PathBuf {
    PathBuf::from("backend/prisma/schema.prisma")
}

fn default_types() -> PathBuf {
    PathBuf::from("frontend/src/types/models.ts")
}

fn default_docs() -> PathBuf {
    PathBuf::from("DOCUMENTATION.md")
}

/// Datasource block of the generated schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasourceConfig {
    /// Database provider name.
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Environment variable holding the connection URL.
    #[serde(default = "default_url_env")]
    pub url_env: String,
}

impl Default for DatasourceConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            url_env: default_url_env(),
        }
    }
}

fn default_provider() -> String {
    "postgresql".to_string()
}

fn default_url_env() -> String {
    "DATABASE_URL".to_string()
}
