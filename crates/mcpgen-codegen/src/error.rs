//! Error types for the sync pipeline.

use std::fmt;
use std::path::PathBuf;

use mcpgen_core::{Finding, RegistryError};

/// Pipeline step a run was in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    LoadRegistry,
    EmitSchema,
    EmitTypes,
    BuildDescriptor,
    RenderDocs,
    Commit,
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncStage::LoadRegistry => "load-registry",
            SyncStage::EmitSchema => "emit-schema",
            SyncStage::EmitTypes => "emit-types",
            SyncStage::BuildDescriptor => "build-descriptor",
            SyncStage::RenderDocs => "render-docs",
            SyncStage::Commit => "commit",
        };
        f.write_str(name)
    }
}

/// Errors that abort a sync run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("registry has {} validation error(s)", .errors.len())]
    Validation { errors: Vec<Finding> },

    #[error("failed to serialize project descriptor: {0}")]
    Descriptor(#[source] serde_json::Error),

    #[error("failed to stage {path}: {source}")]
    Stage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// The step that failed.
    pub fn stage(&self) -> SyncStage {
        match self {
            SyncError::Registry(_) | SyncError::Validation { .. } => SyncStage::LoadRegistry,
            SyncError::Descriptor(_) => SyncStage::BuildDescriptor,
            SyncError::Stage { .. } | SyncError::Persist { .. } => SyncStage::Commit,
        }
    }
}
