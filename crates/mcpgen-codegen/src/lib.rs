//! Artifact generation for mcpgen.
//!
//! Each generator is a pure function of the model registry (plus
//! configuration where noted). The [`sync`] module wires them together and
//! commits the results.

pub mod descriptor;
pub mod docs;
mod enums;
pub mod error;
pub mod schema;
pub mod sync;
pub mod types;

pub use descriptor::ProjectDescriptor;
pub use docs::render_docs;
pub use error::{SyncError, SyncStage};
pub use schema::SchemaGenerator;
pub use sync::{
    Artifact, ArtifactKind, ArtifactOutcome, ArtifactStatus, SyncMode, SyncOrchestrator,
    SyncReport, artifact_paths, run_sync,
};
pub use types::TypesGenerator;
