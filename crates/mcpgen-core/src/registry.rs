//! The model registry (`mcp.json`).
//!
//! The registry is the single source of truth for every generated artifact.
//! Field order inside a model is significant and preserved from the file
//! through every generator.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::field_type::FieldType;

/// Error type for registry loading and saving.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("model registry not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model registry {} is not valid: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Canonical list of entity definitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelRegistry {
    pub models: Vec<ModelDefinition>,

    /// Top-level keys other than `models`, kept so a rewrite does not drop them.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One domain entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    pub name: String,
    pub fields: IndexMap<String, FieldType>,
}

impl ModelDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Builder-style field insertion, mostly for tests and the editor.
    pub fn with_field(mut self, name: impl Into<String>, ty: impl Into<FieldType>) -> Self {
        self.fields.insert(name.into(), ty.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldType> {
        self.fields.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Foreign key fields, in declaration order.
    pub fn relations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().filter_map(|(name, ty)| {
            ty.foreign_model()
                .filter(|_| ty.is_relation(name))
                .map(|model| (name.as_str(), model))
        })
    }
}

impl ModelRegistry {
    /// Load the registry from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                RegistryError::NotFound(path.to_path_buf())
            } else {
                RegistryError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        serde_json::from_str(&content).map_err(|source| RegistryError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse registry JSON content.
    pub fn from_json(content: &str) -> Result<Self, RegistryError> {
        serde_json::from_str(content).map_err(RegistryError::from)
    }

    /// Pretty JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String, RegistryError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Write the registry back to disk. The new content is staged in a
    /// sibling temporary file and renamed over the original.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RegistryError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        let io_err = |source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut staged = tempfile::NamedTempFile::new_in(&dir).map_err(io_err)?;
        staged.write_all(json.as_bytes()).map_err(io_err)?;
        staged.persist(path).map_err(|e| io_err(e.error))?;

        tracing::debug!(path = %path.display(), models = self.models.len(), "Saved model registry");
        Ok(())
    }

    pub fn get_model(&self, name: &str) -> Option<&ModelDefinition> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn has_model(&self, name: &str) -> bool {
        self.get_model(name).is_some()
    }

    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }
}
